//! Google Gemini backend (`gemini-2.0-flash`). Rate limiting (429 /
//! RESOURCE_EXHAUSTED) is retried in place; see `retry`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::retry::{retry_on_rate_limit, RATE_LIMIT_ATTEMPTS, RATE_LIMIT_BACKOFF};
use crate::llm_client::{api_error_message, Provider, ProviderError, TextGenerator};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Clone)]
pub struct GeminiProvider {
    api_base: String,
    api_key: String,
    client: Client,
    backoff: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: String, client: Client) -> Self {
        Self {
            api_base: GEMINI_API_BASE.to_string(),
            api_key,
            client,
            backoff: RATE_LIMIT_BACKOFF,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the per-attempt rate-limit wait (15s in production).
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, GEMINI_MODEL);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or(ProviderError::EmptyContent)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let text = retry_on_rate_limit(Provider::Gemini, RATE_LIMIT_ATTEMPTS, self.backoff, |_| {
            self.generate_once(prompt)
        })
        .await?;

        info!("gemini response received ({} chars)", text.len());
        Ok(text)
    }
}
