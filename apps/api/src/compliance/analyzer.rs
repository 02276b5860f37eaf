//! Mechanical compliance analysis — structural and formatting conformance of a
//! resume, independent of content quality or job relevance.
//!
//! Pure and deterministic: no I/O, no LLM calls, safe to run on any thread.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compliance::checks::{
    analyze_formatting, check_buzzwords, check_contact_info, check_date_consistency,
    check_file_size, check_section_headers, check_special_chars, detect_tables_columns,
    estimate_page_count, validate_parsing, ComplexLayout, ContactInfo, DateConsistency,
    FileSizeCheck, Formatting, PageCheck, SpecialChars, REQUIRED_SECTIONS,
};
use crate::models::metadata::DocumentMetadata;

/// Flat bonus added after all components. The weights deliberately sum past 100;
/// the final clamp keeps the score in range.
const BASELINE_BONUS: i32 = 15;
const MAX_BUZZWORD_PENALTY: i32 = 10;

/// Full mechanical report. Built once per analysis and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub parsing_valid: bool,
    pub section_headers: BTreeMap<String, bool>,
    pub contact_info: ContactInfo,
    pub formatting: Formatting,
    pub buzzwords: Vec<String>,
    pub page_check: PageCheck,
    pub date_consistency: DateConsistency,
    pub complex_layout: ComplexLayout,
    pub special_chars: SpecialChars,
    pub file_size_check: FileSizeCheck,
    pub mechanical_score: u32, // 0 – 100
}

/// Runs every mechanical check over `text` and composes the 0–100 score.
pub fn analyze_mechanical(text: &str, metadata: Option<&DocumentMetadata>) -> ComplianceReport {
    let file_size = metadata.map(|m| m.file_size).unwrap_or(0);

    let mut report = ComplianceReport {
        parsing_valid: validate_parsing(text),
        section_headers: check_section_headers(text),
        contact_info: check_contact_info(text),
        formatting: analyze_formatting(text),
        buzzwords: check_buzzwords(text),
        page_check: estimate_page_count(text),
        date_consistency: check_date_consistency(text),
        complex_layout: detect_tables_columns(text),
        special_chars: check_special_chars(text),
        file_size_check: check_file_size(file_size),
        mechanical_score: 0,
    };
    report.mechanical_score = compute_mechanical_score(&report);
    report
}

/// Additive integer score, clamped to [0, 100] as the last step.
///
/// ```text
/// +15 parse ok   +15*(headers/3)   +5 email   +5 phone   +10 bullets
/// +10 length     +5 dates          +5 no tables          +10 clean chars
/// +5 file size   -min(2*buzzwords, 10)                   +15 baseline
/// ```
fn compute_mechanical_score(report: &ComplianceReport) -> u32 {
    let mut score: i32 = 0;

    if report.parsing_valid {
        score += 15;
    }

    let headers_found = report.section_headers.values().filter(|found| **found).count() as i32;
    score += 15 * headers_found / REQUIRED_SECTIONS.len() as i32;

    if report.contact_info.email_found {
        score += 5;
    }
    if report.contact_info.phone_found {
        score += 5;
    }
    if report.formatting.bullet_points_detected {
        score += 10;
    }
    if report.page_check.is_appropriate_length {
        score += 10;
    }
    if report.date_consistency.is_consistent {
        score += 5;
    }
    if !report.complex_layout.potential_tables {
        score += 5;
    }
    if !report.special_chars.has_special_chars {
        score += 10;
    }
    if report.file_size_check.is_valid {
        score += 5;
    }

    let buzzword_count = report.buzzwords.len() as i32;
    score -= (buzzword_count * 2).min(MAX_BUZZWORD_PENALTY);

    (score + BASELINE_BONUS).clamp(0, 100) as u32
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a resume that earns every mechanical point: three headers, email,
    /// phone, five bullets, consistent MM/YYYY dates, ASCII only, no column gaps,
    /// padded to exactly `total_words` words.
    pub(crate) fn full_marks_resume(total_words: usize) -> String {
        let mut lines = vec![
            "Jane Doe".to_string(),
            "jane@example.com 555-123-4567".to_string(),
            "Experience".to_string(),
            "Senior Engineer, Acme Corp 01/2019 - 05/2023".to_string(),
            "- Built billing pipeline processing orders".to_string(),
            "- Reduced latency by forty percent".to_string(),
            "- Led migration to managed databases".to_string(),
            "- Mentored four junior engineers".to_string(),
            "- Automated release process end to end".to_string(),
            "Engineer, Initech 06/2016 - 12/2018".to_string(),
            "Education".to_string(),
            "BSc Computer Science 09/2012 - 06/2016".to_string(),
            "Skills".to_string(),
        ];
        let used: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
        assert!(used < total_words, "fixture needs at least {used} words");
        lines.push(vec!["rust"; total_words - used].join(" "));
        lines.join("\n")
    }

    #[test]
    fn test_full_marks_resume_scores_100() {
        let text = full_marks_resume(300);
        let report = analyze_mechanical(&text, None);

        assert!(report.parsing_valid);
        assert_eq!(report.page_check.word_count, 300);
        assert_eq!(report.page_check.estimated_pages, 0.8);
        assert!(report.page_check.is_appropriate_length);
        assert!(report.section_headers.values().all(|found| *found));
        assert!(report.contact_info.email_found);
        assert!(report.contact_info.phone_found);
        assert!(report.formatting.bullet_points_detected);
        assert!(report.date_consistency.is_consistent);
        assert_eq!(report.date_consistency.dominant_format, "MM/YYYY");
        assert!(!report.complex_layout.potential_tables);
        assert!(!report.special_chars.has_special_chars);
        assert!(report.file_size_check.is_valid);
        assert!(report.buzzwords.is_empty());
        assert_eq!(report.mechanical_score, 100);
    }

    #[test]
    fn test_four_buzzwords_cost_eight_points() {
        let mut text = full_marks_resume(300);
        text.push_str("\nKnown as a team player, hard worker, fast learner and go-getter.");
        let report = analyze_mechanical(&text, None);
        assert_eq!(report.buzzwords.len(), 4);
        assert_eq!(report.mechanical_score, 92);
    }

    #[test]
    fn test_buzzword_penalty_caps_at_ten() {
        let mut text = full_marks_resume(300);
        text.push_str("\nteam player, hard worker, fast learner, go-getter, synergy, synergy");
        let report = analyze_mechanical(&text, None);
        assert_eq!(report.buzzwords.len(), 5);
        assert_eq!(report.mechanical_score, 90);
    }

    #[test]
    fn test_partial_headers_score_proportionally() {
        let text = full_marks_resume(300).replace("Skills", "Toolbox");
        let report = analyze_mechanical(&text, None);
        assert_eq!(report.section_headers.get("skills"), Some(&false));
        assert_eq!(report.mechanical_score, 95);
    }

    #[test]
    fn test_oversized_upload_loses_file_size_points() {
        let text = full_marks_resume(300);
        let metadata = DocumentMetadata {
            file_size: 5 * 1024 * 1024,
        };
        let report = analyze_mechanical(&text, Some(&metadata));
        assert!(!report.file_size_check.is_valid);
        assert_eq!(report.mechanical_score, 95);
    }

    #[test]
    fn test_empty_text_score_in_range() {
        let report = analyze_mechanical("", None);
        assert!(!report.parsing_valid);
        // no tables (5) + clean chars (10) + file size skipped (5) + baseline (15)
        assert_eq!(report.mechanical_score, 35);
    }

    #[test]
    fn test_all_emoji_text_score_in_range() {
        let text = "😀 ".repeat(500);
        let report = analyze_mechanical(&text, None);
        assert!(report.special_chars.has_special_chars);
        assert!(report.mechanical_score <= 100);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let text = full_marks_resume(250);
        let first = serde_json::to_string(&analyze_mechanical(&text, None)).unwrap();
        let second = serde_json::to_string(&analyze_mechanical(&text, None)).unwrap();
        assert_eq!(first, second);
    }
}
