/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Handlers and services go through `ProviderRouter`, which owns priority
/// ordering and failover between the configured backends.
///
/// Backends (default priority): Groq (free tier) > Gemini > OpenAI.
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chat_completions;
pub mod gemini;
pub mod prompts;
pub mod retry;
pub mod router;

pub use router::{Generation, ProviderRouter, RouteError};

/// Default failover order when `PROVIDER_PRIORITY` is not set.
pub const DEFAULT_PRIORITY: [Provider; 3] = [Provider::Groq, Provider::Gemini, Provider::OpenAi];

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} attempts")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl ProviderError {
    /// 429s and quota exhaustion are retried in place before failing over.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ProviderError::Api { status, message } => {
                *status == 429 || message.contains("RESOURCE_EXHAUSTED")
            }
            _ => false,
        }
    }
}

/// An interchangeable text-generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    pub fn env_key(&self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// Which backend a request would like to use. Unknown names mean `Auto`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProviderPreference {
    #[default]
    Auto,
    Explicit(Provider),
}

impl From<String> for ProviderPreference {
    fn from(name: String) -> Self {
        name.parse::<Provider>()
            .map(ProviderPreference::Explicit)
            .unwrap_or(ProviderPreference::Auto)
    }
}

/// Uniform `generate(prompt) -> text` capability implemented by every backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Pulls `error.message` out of an OpenAI/Gemini-style error body, falling back
/// to the raw body.
pub(crate) fn api_error_message(body: String) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
        #[serde(default)]
        status: Option<String>,
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body,
    }
}
