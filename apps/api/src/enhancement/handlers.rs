//! Axum route handlers for the Enhancement API.
//!
//! Provider outages are not HTTP errors here: the response carries the
//! terminal message in place of the generated text and `provider: null`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::enhancement::prompts::TaskKind;
use crate::enhancement::service;
use crate::errors::AppError;
use crate::llm_client::router::{ProviderFailure, ALL_PROVIDERS_FAILED};
use crate::llm_client::{Generation, Provider, ProviderPreference, RouteError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub text: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub provider: ProviderPreference,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub original: String,
    pub enhanced: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: Option<Provider>,
    pub fallbacks: Vec<ProviderFailure>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub provider: ProviderPreference,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub provider: Option<Provider>,
    pub fallbacks: Vec<ProviderFailure>,
}

/// Text, provider and skipped backends of a routed call, with total failure
/// flattened into the terminal message.
fn settle(result: Result<Generation, RouteError>) -> (String, Option<Provider>, Vec<ProviderFailure>) {
    match result {
        Ok(generation) => (generation.text, Some(generation.provider), generation.fallbacks),
        Err(RouteError::AllProvidersFailed { failures }) => {
            (ALL_PROVIDERS_FAILED.to_string(), None, failures)
        }
        Err(e @ RouteError::NoProviderAvailable) => {
            warn!("{e}");
            (ALL_PROVIDERS_FAILED.to_string(), None, Vec::new())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    // The response echoes the requested type; unknown names prompt as general.
    let requested = request.kind.unwrap_or_else(|| "general".to_string());
    let kind = TaskKind::parse(&requested);
    let result = service::enhance(
        &state.router,
        &request.text,
        kind,
        request.provider,
        request.job_description.as_deref(),
    )
    .await;
    let (enhanced, provider, fallbacks) = settle(result);

    Ok(Json(EnhanceResponse {
        original: request.text,
        enhanced,
        kind: requested,
        provider,
        fallbacks,
    }))
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let result = service::chat(
        &state.router,
        &request.message,
        &request.context,
        request.provider,
    )
    .await;
    let (reply, provider, fallbacks) = settle(result);

    Ok(Json(ChatResponse {
        reply,
        provider,
        fallbacks,
    }))
}
