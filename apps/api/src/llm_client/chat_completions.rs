//! OpenAI-compatible chat completions backend. Serves both Groq (free tier,
//! Llama 3.3 70B) and OpenAI; the two differ only in endpoint, model, system
//! prompt and sampling settings. Single attempt: failover is the router's job.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::llm_client::prompts::{GROQ_SYSTEM, OPENAI_SYSTEM};
use crate::llm_client::{api_error_message, Provider, ProviderError, TextGenerator};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const GROQ_TEMPERATURE: f32 = 0.7;
const GROQ_MAX_TOKENS: u32 = 4096;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatCompletionsProvider {
    provider: Provider,
    endpoint: String,
    model: &'static str,
    system: &'static str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    api_key: String,
    client: Client,
}

impl ChatCompletionsProvider {
    pub fn groq(api_key: String, client: Client) -> Self {
        Self {
            provider: Provider::Groq,
            endpoint: GROQ_API_URL.to_string(),
            model: GROQ_MODEL,
            system: GROQ_SYSTEM,
            temperature: Some(GROQ_TEMPERATURE),
            max_tokens: Some(GROQ_MAX_TOKENS),
            api_key,
            client,
        }
    }

    pub fn openai(api_key: String, client: Client) -> Self {
        Self {
            provider: Provider::OpenAi,
            endpoint: OPENAI_API_URL.to_string(),
            model: OPENAI_MODEL,
            system: OPENAI_SYSTEM,
            temperature: None,
            max_tokens: None,
            api_key,
            client,
        }
    }

    /// Points the provider at a different OpenAI-compatible endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        info!("Calling {} ({})", self.provider, self.model);

        let request_body = ChatRequest {
            model: self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let chat: ChatResponse = response.json().await?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyContent)?;

        info!("{} response received ({} chars)", self.provider, text.len());
        debug!("{} prompt was {} chars", self.provider, prompt.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::llm_client::tests::{spawn_fake_backend, test_client};

    #[tokio::test]
    async fn test_groq_sends_system_prompt_and_sampling_settings() {
        let app = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], GROQ_MODEL);
                assert_eq!(body["max_tokens"], 4096);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "Rewrite this");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "  Rewritten.  "}}]
                }))
            }),
        );
        let base = spawn_fake_backend(app).await;

        let groq = ChatCompletionsProvider::groq("key".to_string(), test_client())
            .with_endpoint(format!("{base}/chat"));
        assert_eq!(groq.generate("Rewrite this").await.unwrap(), "Rewritten.");
    }

    #[tokio::test]
    async fn test_openai_omits_sampling_settings() {
        let app = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], OPENAI_MODEL);
                assert!(body.get("temperature").is_none());
                assert!(body.get("max_tokens").is_none());
                Json(json!({"choices": [{"message": {"content": "ok"}}]}))
            }),
        );
        let base = spawn_fake_backend(app).await;

        let openai = ChatCompletionsProvider::openai("key".to_string(), test_client())
            .with_endpoint(format!("{base}/chat"));
        assert_eq!(openai.generate("hi").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let app = Router::new().route(
            "/chat",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Invalid API Key"}})),
                )
            }),
        );
        let base = spawn_fake_backend(app).await;

        let groq = ChatCompletionsProvider::groq("bad".to_string(), test_client())
            .with_endpoint(format!("{base}/chat"));
        match groq.generate("hi").await {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let app = Router::new().route("/chat", post(|| async { Json(json!({"choices": []})) }));
        let base = spawn_fake_backend(app).await;

        let openai = ChatCompletionsProvider::openai("key".to_string(), test_client())
            .with_endpoint(format!("{base}/chat"));
        assert!(matches!(
            openai.generate("hi").await,
            Err(ProviderError::EmptyContent)
        ));
    }
}
