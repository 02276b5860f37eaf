// Cross-cutting prompt fragments shared by every backend.
// Task-specific prompts live next to the service that sends them
// (enhancement::prompts, scoring::prompts).

/// Groq system prompt. Groq is the default backend, so it is primed for the
/// resume domain.
pub const GROQ_SYSTEM: &str = "You are a professional resume writing and ATS optimization expert.";

/// OpenAI system prompt.
pub const OPENAI_SYSTEM: &str = "You are a helpful assistant.";

/// Builds the closing instruction for rewrite prompts: the model must return
/// only `thing`, with no framing text around it.
pub fn return_only(thing: &str) -> String {
    format!(
        "IMPORTANT: Return ONLY the {thing}. Do not include any introductory or concluding remarks."
    )
}
