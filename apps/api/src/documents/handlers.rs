//! Axum route handlers for the Documents API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::extract::{contact_preview, extract_text, ContactPreview};
use crate::documents::render::{render, ExportFormat};
use crate::documents::templates::Template;
use crate::errors::AppError;
use crate::models::metadata::DocumentMetadata;
use crate::models::resume::ResumeData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub filename: String,
    pub text: String,
    pub parsed_data: ContactPreview,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub data: ResumeData,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub filename: String,
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/parse
///
/// Multipart upload with a single `file` field (.pdf, .docx or .txt). Returns the
/// extracted text plus the metadata the analyzer needs for its size check.
pub async fn handle_parse(mut multipart: Multipart) -> Result<Json<ParseResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        info!("Parsing upload {filename} ({} bytes)", bytes.len());

        let document = extract_text(&filename, bytes).await?;
        let parsed_data = contact_preview(&document.text);

        return Ok(Json(ParseResponse {
            filename,
            text: document.text,
            parsed_data,
            metadata: document.metadata,
        }));
    }

    Err(AppError::Validation("multipart field 'file' is required".to_string()))
}

/// POST /api/v1/generate
///
/// Renders resume data with the named template. The file is served from
/// `/output/<filename>`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let format: ExportFormat = request.format.as_deref().unwrap_or("pdf").parse()?;
    let template = Template::parse(request.template.as_deref().unwrap_or("classic"));

    let rendered = render(&request.data, format, template, &state.config.output_dir).await?;

    Ok(Json(GenerateResponse {
        message: "Resume generated successfully".to_string(),
        url: format!("/output/{}", rendered.filename),
        filename: rendered.filename,
    }))
}
