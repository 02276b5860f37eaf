// Rewrite and chat prompts.
// Each task kind maps to one fixed template; output framing is enforced with
// llm_client::prompts::return_only.

use crate::llm_client::prompts::return_only;

/// What kind of rewrite the caller wants. Unknown names mean `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    General,
    Keywords,
    Grammar,
    Summary,
    BulletPoints,
}

impl TaskKind {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "keywords" => TaskKind::Keywords,
            "grammar" => TaskKind::Grammar,
            "summary" => TaskKind::Summary,
            "bullet_points" => TaskKind::BulletPoints,
            _ => TaskKind::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::General => "general",
            TaskKind::Keywords => "keywords",
            TaskKind::Grammar => "grammar",
            TaskKind::Summary => "summary",
            TaskKind::BulletPoints => "bullet_points",
        }
    }
}

/// Builds the rewrite prompt. Keyword optimization needs a job description;
/// without one it degrades to the general rewrite.
pub fn build_enhance_prompt(kind: TaskKind, text: &str, job_description: Option<&str>) -> String {
    let job_description = job_description.filter(|jd| !jd.trim().is_empty());

    match (kind, job_description) {
        (TaskKind::Keywords, Some(jd)) => format!(
            "You are an ATS optimization expert. Rewrite the following text to include relevant keywords from the Job Description provided below.\n\
             Maintain the original meaning but ensure high keyword density for ATS matching.\n\
             {}\n\n\
             Job Description:\n{jd}\n\n\
             Original Text:\n{text}\n\n\
             Optimized Text:",
            return_only("optimized text")
        ),
        (TaskKind::Grammar, _) => format!(
            "You are a professional editor. Correct any grammar, spelling, and punctuation errors in the following text.\n\
             Improve sentence structure for clarity and flow, but keep the tone professional.\n\
             {}\n\n\
             Original Text:\n{text}\n\n\
             Corrected Text:",
            return_only("corrected text")
        ),
        (TaskKind::Summary, _) => format!(
            "You are a professional resume writer. Create a compelling professional summary (3-4 sentences) based on the following resume content.\n\
             Highlight key achievements, skills, and experience relevant to the role.\n\
             {}\n\n\
             Resume Content:\n{text}\n\n\
             Professional Summary:",
            return_only("summary")
        ),
        (TaskKind::BulletPoints, _) => format!(
            "You are a professional resume writer. Rewrite the following work experience or project description into strong, ATS-friendly bullet points.\n\
             Use action verbs, quantify achievements where possible, and keep each bullet concise.\n\
             {}\n\n\
             Original Text:\n{text}\n\n\
             Enhanced Bullet Points:",
            return_only("bullet points")
        ),
        _ => format!(
            "You are a professional resume writer. Rewrite the following text to be more professional, \n\
             concise, and ATS-friendly. Use action verbs and quantify achievements where possible.\n\
             {}\n\n\
             Original Text:\n{text}\n\n\
             Enhanced Text:",
            return_only("enhanced text")
        ),
    }
}

pub fn build_chat_prompt(message: &str, resume_context: &str) -> String {
    format!(
        "You are a helpful AI Resume Consultant. The user has questions about their resume.\n\
         User Question: {message}\n\n\
         Resume Context:\n{resume_context}\n\n\
         Provide a helpful, professional, and concise answer."
    )
}
