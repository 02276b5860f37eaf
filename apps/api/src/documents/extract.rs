//! Text extraction from uploaded resume files.

use std::path::Path;
use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::documents::docx::paragraphs_text;
use crate::models::metadata::DocumentMetadata;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// First loose email/phone match, for prefilling an editor. Empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactPreview {
    pub email: String,
    pub phone: String,
}

fn loose_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid regex"))
}

fn loose_phone() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex"))
}

/// Lowercased extension of `filename`, without the dot.
fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Extracts plain text from a `.pdf`, `.docx` or `.txt` upload. The file size is
/// recorded so the mechanical analyzer can check it.
pub async fn extract_text(filename: &str, bytes: Bytes) -> Result<ExtractedDocument, ExtractError> {
    let metadata = DocumentMetadata {
        file_size: bytes.len() as u64,
    };

    let text = match extension(filename).as_str() {
        "pdf" => {
            // pdf-extract can panic on malformed input; a panicked task
            // surfaces as a JoinError.
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ExtractError::Pdf(format!("extraction aborted: {e}")))?
                .map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        "docx" => tokio::task::spawn_blocking(move || paragraphs_text(&bytes))
            .await
            .map_err(|e| ExtractError::Docx(format!("extraction aborted: {e}")))?
            .map_err(ExtractError::Docx)?,
        "txt" => String::from_utf8_lossy(&bytes).into_owned(),
        "" => return Err(ExtractError::UnsupportedFormat("(none)".to_string())),
        other => return Err(ExtractError::UnsupportedFormat(format!(".{other}"))),
    };

    let text = text.trim().to_string();
    info!("Extracted {} chars from {filename}", text.len());
    debug!("{filename}: {} bytes on disk", metadata.file_size);

    Ok(ExtractedDocument { text, metadata })
}

pub fn contact_preview(text: &str) -> ContactPreview {
    let first = |re: &Regex| re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default();
    ContactPreview {
        email: first(loose_email()),
        phone: first(loose_phone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::documents::docx::build_resume;
    use crate::models::resume::ResumeData;

    #[tokio::test]
    async fn test_txt_is_decoded_and_trimmed() {
        let doc = extract_text("resume.TXT", Bytes::from_static(b"\n  Jane Doe\nEngineer  \n"))
            .await
            .unwrap();
        assert_eq!(doc.text, "Jane Doe\nEngineer");
        assert_eq!(doc.metadata.file_size, 23);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let doc = extract_text("r.txt", Bytes::from_static(b"caf\xff")).await.unwrap();
        assert_eq!(doc.text, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_docx_paragraphs_are_extracted() {
        let data = ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..ResumeData::default()
        };
        let bytes = Bytes::from(build_resume(&data).unwrap());

        let doc = extract_text("Resume.DOCX", bytes.clone()).await.unwrap();

        assert!(doc.text.starts_with("Jane Doe\njane@example.com | "));
        assert!(doc.text.contains("\nSummary\n"));
        assert!(doc.text.ends_with("Education"));
        assert_eq!(doc.metadata.file_size, bytes.len() as u64);
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_an_error() {
        let result = extract_text("resume.docx", Bytes::from_static(b"PK")).await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_unsupported() {
        let result = extract_text("resume.odt", Bytes::from_static(b"PK")).await;
        match result {
            Err(ExtractError::UnsupportedFormat(ext)) => assert_eq!(ext, ".odt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            extract_text("resume", Bytes::from_static(b"text")).await,
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error() {
        let result = extract_text("resume.pdf", Bytes::from_static(b"not a pdf at all")).await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_contact_preview() {
        let preview = contact_preview("Jane Doe\njane.doe@mail.example.com\n(555) 123-4567");
        assert_eq!(preview.email, "jane.doe@mail.example.com");
        assert_eq!(preview.phone, "(555) 123-4567");

        assert_eq!(contact_preview("no contact here"), ContactPreview::default());
    }
}
