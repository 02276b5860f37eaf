//! Renders structured resume data to `.tex`, optionally compiled to PDF via
//! `pdflatex`, or to `.docx`.
//!
//! Every string field is LaTeX-escaped before it reaches a template; the Word
//! export takes the raw data. Output
//! names carry a random suffix so concurrent renders of the same name never
//! overwrite each other.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::documents::docx::build_resume;
use crate::documents::templates::Template;
use crate::models::resume::{ResumeData, SkillList};

const PDFLATEX: &str = "pdflatex";
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);
/// pdflatex side files removed after a successful compile.
const AUXILIARY_EXTENSIONS: [&str; 3] = ["aux", "log", "out"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("pdflatex not found. Please install a TeX distribution.")]
    CompilerMissing,

    #[error("PDF generation failed: {0}")]
    CompileFailed(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Tex,
    Docx,
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "tex" | "latex" => Ok(ExportFormat::Tex),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub filename: String,
    pub path: PathBuf,
    pub format: ExportFormat,
}

pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str(r"\&"),
            '%' => escaped.push_str(r"\%"),
            '$' => escaped.push_str(r"\$"),
            '#' => escaped.push_str(r"\#"),
            '_' => escaped.push_str(r"\_"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Returns a copy of `data` with every string field LaTeX-escaped.
pub fn sanitize(data: &ResumeData) -> ResumeData {
    let esc = |s: &String| escape_latex(s);
    let esc_all = |items: &Vec<String>| items.iter().map(|s| escape_latex(s)).collect::<Vec<_>>();

    let mut clean = data.clone();
    clean.name = esc(&data.name);
    clean.email = esc(&data.email);
    clean.phone = esc(&data.phone);
    clean.location = esc(&data.location);
    clean.linkedin = esc(&data.linkedin);
    clean.github = esc(&data.github);
    clean.summary = esc(&data.summary);

    for edu in &mut clean.education {
        edu.degree = escape_latex(&edu.degree);
        edu.school = escape_latex(&edu.school);
        edu.dates = escape_latex(&edu.dates);
        edu.location = escape_latex(&edu.location);
    }
    for job in &mut clean.experience {
        job.role = escape_latex(&job.role);
        job.company = escape_latex(&job.company);
        job.dates = escape_latex(&job.dates);
        job.location = escape_latex(&job.location);
        job.details = esc_all(&job.details);
    }
    for project in &mut clean.projects {
        project.name = escape_latex(&project.name);
        project.technologies = escape_latex(&project.technologies);
        project.dates = escape_latex(&project.dates);
        project.details = esc_all(&project.details);
    }
    clean.skills = data
        .skills
        .iter()
        .map(|(category, skills)| {
            let skills = match skills {
                SkillList::List(items) => SkillList::List(esc_all(items)),
                SkillList::Text(text) => SkillList::Text(escape_latex(text)),
            };
            (escape_latex(category), skills)
        })
        .collect();

    clean
}

/// `resume_<name>_<suffix>`, with every non-alphanumeric char of the raw
/// name replaced by `_`.
fn file_stem(raw_name: &str) -> String {
    let safe_name: String = raw_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("resume_{safe_name}_{}", &suffix[..8])
}

pub async fn render(
    data: &ResumeData,
    format: ExportFormat,
    template: Template,
    output_dir: &Path,
) -> Result<RenderedDocument, RenderError> {
    let stem = file_stem(&data.name);
    tokio::fs::create_dir_all(output_dir).await?;

    let path = match format {
        ExportFormat::Docx => {
            let docx_path = output_dir.join(format!("{stem}.docx"));
            let bytes = build_resume(data).map_err(RenderError::Docx)?;
            tokio::fs::write(&docx_path, bytes).await?;
            docx_path
        }
        ExportFormat::Tex => write_tex(data, template, output_dir, &stem).await?,
        ExportFormat::Pdf => {
            let tex_path = write_tex(data, template, output_dir, &stem).await?;
            compile_pdf(&tex_path, output_dir).await?;
            cleanup_auxiliary(output_dir, &stem).await;
            output_dir.join(format!("{stem}.pdf"))
        }
    };

    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default()
        .to_string();
    info!(
        "Rendered {filename} (template={}, format={format:?})",
        template.as_str()
    );

    Ok(RenderedDocument {
        filename,
        path,
        format,
    })
}

async fn write_tex(
    data: &ResumeData,
    template: Template,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf, RenderError> {
    let tex_path = output_dir.join(format!("{stem}.tex"));
    tokio::fs::write(&tex_path, template.render(&sanitize(data))).await?;
    debug!("Wrote {}", tex_path.display());
    Ok(tex_path)
}

async fn compile_pdf(tex_path: &Path, output_dir: &Path) -> Result<(), RenderError> {
    let mut command = Command::new(PDFLATEX);
    command
        .arg("-interaction=nonstopmode")
        .arg("-halt-on-error")
        .arg("-output-directory")
        .arg(output_dir)
        .arg(tex_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RenderError::CompilerMissing)
        }
        Err(e) => return Err(RenderError::Io(e)),
    };

    let output = tokio::time::timeout(COMPILE_TIMEOUT, child.wait_with_output())
        .await
        .map_err(|_| {
            RenderError::CompileFailed(format!(
                "pdflatex timed out after {}s",
                COMPILE_TIMEOUT.as_secs()
            ))
        })??;

    if !output.status.success() {
        // pdflatex reports errors on stdout; the tail holds the first `!` line.
        let log = String::from_utf8_lossy(&output.stdout);
        let tail: Vec<&str> = log.lines().rev().take(15).collect();
        let tail: Vec<&str> = tail.into_iter().rev().collect();
        warn!("pdflatex exited with {}", output.status);
        return Err(RenderError::CompileFailed(format!(
            "pdflatex exited with {}: {}",
            output.status,
            tail.join("\n")
        )));
    }

    Ok(())
}

async fn cleanup_auxiliary(output_dir: &Path, stem: &str) {
    for ext in AUXILIARY_EXTENSIONS {
        let path = output_dir.join(format!("{stem}.{ext}"));
        if let Err(e) = tokio::fs::remove_file(&path).await {
            debug!("Could not remove {}: {e}", path.display());
        }
    }
}
