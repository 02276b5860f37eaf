//! Enhancement operations over the provider router.

use tracing::info;

use crate::enhancement::prompts::{build_chat_prompt, build_enhance_prompt, TaskKind};
use crate::llm_client::{Generation, ProviderPreference, ProviderRouter, RouteError};

/// Rewrites `text` according to `kind`.
pub async fn enhance(
    router: &ProviderRouter,
    text: &str,
    kind: TaskKind,
    preference: ProviderPreference,
    job_description: Option<&str>,
) -> Result<Generation, RouteError> {
    info!(
        "Enhancing {} chars (type={}, preference={:?})",
        text.len(),
        kind.as_str(),
        preference
    );

    let prompt = build_enhance_prompt(kind, text, job_description);
    router.route(preference, &prompt).await
}

/// Answers a question about the supplied resume.
pub async fn chat(
    router: &ProviderRouter,
    message: &str,
    resume_context: &str,
    preference: ProviderPreference,
) -> Result<Generation, RouteError> {
    info!("Chat message of {} chars (preference={:?})", message.len(), preference);

    let prompt = build_chat_prompt(message, resume_context);
    router.route(preference, &prompt).await
}
