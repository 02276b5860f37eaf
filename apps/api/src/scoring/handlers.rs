//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::models::metadata::DocumentMetadata;
use crate::scoring::FinalScoreReport;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

/// POST /api/v1/score
///
/// Full scoring pipeline. Provider outages degrade the report to heuristic
/// scoring, and empty or short text yields the rejected report; neither
/// fails the request.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Json<FinalScoreReport> {
    info!(
        "Scoring resume ({} chars, job description {} chars)",
        request.resume_text.len(),
        request.job_description.as_deref().map_or(0, str::len)
    );

    let report = state
        .scorer
        .score(
            &request.resume_text,
            request.job_description.as_deref(),
            request.metadata.as_ref(),
        )
        .await;

    Json(report)
}
