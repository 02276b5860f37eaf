//! Axum route handlers for the Compliance API.

use axum::Json;
use serde::Deserialize;

use crate::compliance::{analyze_mechanical, ComplianceReport};
use crate::models::metadata::DocumentMetadata;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

/// POST /api/v1/analyze
///
/// Mechanical checks only. No provider is called, so this is cheap enough for
/// live feedback while editing. Empty text is analyzed like any other input.
pub async fn handle_analyze(Json(request): Json<AnalyzeRequest>) -> Json<ComplianceReport> {
    Json(analyze_mechanical(
        &request.resume_text,
        request.metadata.as_ref(),
    ))
}
