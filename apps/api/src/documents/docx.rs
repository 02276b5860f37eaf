//! Word documents: paragraph text of uploads, and a plain heading/paragraph
//! export of resume data.
//!
//! Both directions go through `docx-rs`. Text comes from body paragraphs only,
//! so table content is not extracted.

use std::io::Cursor;

use docx_rs::{
    read_docx, BreakType, Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Style,
    StyleType,
};

use crate::models::resume::ResumeData;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";
const BULLET_STYLE: &str = "ListBullet";
const BULLET: &str = "\u{2022} ";
const BLANK_NAME: &str = "Name";

/// Text of every body paragraph, one per line. Breaks inside a paragraph
/// become newlines and tabs stay tabs.
pub fn paragraphs_text(bytes: &[u8]) -> Result<String, String> {
    let docx = read_docx(bytes).map_err(|e| e.to_string())?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

fn styles(doc: Docx) -> Docx {
    doc.add_style(
        Style::new(TITLE_STYLE, StyleType::Paragraph)
            .name("Title")
            .size(56)
            .bold(),
    )
    .add_style(
        Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    )
    .add_style(Style::new(BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
}

fn text_paragraph(text: impl Into<String>) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn heading(text: &str, style: &str) -> Paragraph {
    text_paragraph(text).style(style)
}

/// Builds the `.docx` archive for `data`. Fields are written as-is; Word needs
/// no escaping beyond what the XML writer does.
pub fn build_resume(data: &ResumeData) -> Result<Vec<u8>, String> {
    let name = if data.name.trim().is_empty() {
        BLANK_NAME
    } else {
        data.name.as_str()
    };

    let mut doc = styles(Docx::new())
        .add_paragraph(heading(name, TITLE_STYLE))
        .add_paragraph(text_paragraph(format!(
            "{} | {} | {}",
            data.email, data.phone, data.location
        )))
        .add_paragraph(heading("Summary", HEADING_STYLE))
        .add_paragraph(text_paragraph(data.summary.as_str()))
        .add_paragraph(heading("Experience", HEADING_STYLE));

    for job in &data.experience {
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(format!("{} at {}", job.role, job.company))
                        .bold(),
                )
                .add_run(
                    Run::new()
                        .add_break(BreakType::TextWrapping)
                        .add_text(format!("{} | {}", job.dates, job.location)),
                ),
        );
        for detail in &job.details {
            doc = doc.add_paragraph(text_paragraph(format!("{BULLET}{detail}")).style(BULLET_STYLE));
        }
    }

    doc = doc.add_paragraph(heading("Education", HEADING_STYLE));
    for edu in &data.education {
        doc = doc
            .add_paragraph(text_paragraph(format!("{} - {}", edu.degree, edu.school)))
            .add_paragraph(text_paragraph(format!("{} | {}", edu.dates, edu.location)));
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build().pack(&mut buf).map_err(|e| e.to_string())?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::resume::{EducationEntry, ExperienceEntry};

    fn jane() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            location: "Berlin".to_string(),
            summary: "Backend engineer, R&D at 100%.".to_string(),
            experience: vec![ExperienceEntry {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                dates: "2020 - 2024".to_string(),
                location: "Remote".to_string(),
                details: vec!["Cut p99 latency by 40%".to_string(), "Led migration".to_string()],
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                school: "TU Berlin".to_string(),
                dates: "2016 - 2020".to_string(),
                location: "Berlin".to_string(),
            }],
            ..ResumeData::default()
        }
    }

    #[test]
    fn test_export_layout_reads_back_in_order() {
        let bytes = build_resume(&jane()).unwrap();
        let text = paragraphs_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Jane Doe",
                "jane@example.com | 555-123-4567 | Berlin",
                "Summary",
                "Backend engineer, R&D at 100%.",
                "Experience",
                "Engineer at Acme",
                "2020 - 2024 | Remote",
                "\u{2022} Cut p99 latency by 40%",
                "\u{2022} Led migration",
                "Education",
                "BSc Computer Science - TU Berlin",
                "2016 - 2020 | Berlin",
            ]
        );
    }

    #[test]
    fn test_role_line_is_bold() {
        let bytes = build_resume(&jane()).unwrap();
        let docx = read_docx(&bytes).unwrap();

        let role = docx
            .document
            .children
            .iter()
            .find_map(|child| match child {
                DocumentChild::Paragraph(p) if paragraph_text(p).starts_with("Engineer at") => Some(p),
                _ => None,
            })
            .unwrap();
        let ParagraphChild::Run(first) = &role.children[0] else {
            panic!("expected a run");
        };
        assert!(first.run_property.bold.is_some());
    }

    #[test]
    fn test_blank_name_gets_placeholder_title() {
        let data = ResumeData {
            name: "  ".to_string(),
            ..ResumeData::default()
        };
        let text = paragraphs_text(&build_resume(&data).unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some("Name"));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(paragraphs_text(b"PK not really a zip").is_err());
    }
}
