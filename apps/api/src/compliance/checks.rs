//! Individual mechanical checks. Each is a pure function of the resume text
//! (or the upload size) and returns its own slice of the compliance report.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sections every resume is expected to carry.
pub const REQUIRED_SECTIONS: &[&str] = &["experience", "education", "skills"];

/// Cliché phrases penalised by the mechanical score.
pub const BUZZWORDS: &[&str] = &[
    "team player",
    "hard worker",
    "fast learner",
    "go-getter",
    "synergy",
];

const BULLET_MARKERS: &[char] = &['•', '-', '*', '➢', '·'];
const MIN_WORDS_FOR_PARSE: usize = 50;
const WORDS_PER_PAGE: f64 = 400.0;
const MAX_FILE_SIZE_MB: f64 = 2.0;
const NON_ASCII_RATIO_LIMIT: f64 = 0.05;
const PUA_RANGE: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| Regex::new($re).expect("valid regex"))
        }
    };
}

pattern!(
    email_pattern,
    r"\b[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}\b"
);
pattern!(
    phone_pattern,
    r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}"
);
pattern!(linkedin_pattern, r"linkedin\.com/in/[a-zA-Z0-9_-]+");
pattern!(github_pattern, r"github\.com/[a-zA-Z0-9_-]+");
pattern!(digit_pattern, r"\d");
pattern!(slash_date_pattern, r"\b\d{1,2}/\d{4}\b");
pattern!(
    month_date_pattern,
    r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{4}\b"
);
pattern!(column_gap_pattern, r"\S\s{4,}\S");

// ────────────────────────────────────────────────────────────────────────────
// Report slices
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email_found: bool,
    pub phone_found: bool,
    pub linkedin_found: bool,
    pub github_found: bool,
    pub email_feedback: String,
    pub phone_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formatting {
    pub bullet_points_detected: bool,
    pub bullet_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCheck {
    pub word_count: usize,
    pub estimated_pages: f64,
    pub is_appropriate_length: bool,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateConsistency {
    pub is_consistent: bool,
    pub dominant_format: String,
    pub mixed_usage_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexLayout {
    pub potential_tables: bool,
    pub lines_with_gaps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialChars {
    pub has_special_chars: bool,
    pub non_ascii_ratio: f64,
    pub pua_chars_found: usize,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSizeCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────────────────────────────────────

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A parse is trusted only when it yields more than 50 words.
pub fn validate_parsing(text: &str) -> bool {
    word_count(text) > MIN_WORDS_FOR_PARSE
}

pub fn check_section_headers(text: &str) -> BTreeMap<String, bool> {
    let text_lower = text.to_lowercase();
    REQUIRED_SECTIONS
        .iter()
        .map(|section| (section.to_string(), text_lower.contains(section)))
        .collect()
}

pub fn check_contact_info(text: &str) -> ContactInfo {
    let email = email_pattern().find(text).map(|m| m.as_str());
    let phone = phone_pattern().find(text).map(|m| m.as_str());

    let email_feedback = match email {
        None => "Not found",
        Some(email) => {
            let local_part = email.split('@').next().unwrap_or_default();
            if local_part.chars().filter(|c| c.is_ascii_digit()).count() > 4 {
                "Professionalism warning (digits)"
            } else {
                "Looks professional"
            }
        }
    };

    let phone_feedback = match phone {
        None => "Not found",
        Some(phone) => {
            let digits = digit_pattern().find_iter(phone).count();
            if !phone.starts_with('+') && digits < 10 {
                "Missing Country Code/Format?"
            } else {
                "Standard Format"
            }
        }
    };

    ContactInfo {
        email_found: email.is_some(),
        phone_found: phone.is_some(),
        linkedin_found: linkedin_pattern().is_match(text),
        github_found: github_pattern().is_match(text),
        email_feedback: email_feedback.to_string(),
        phone_feedback: phone_feedback.to_string(),
    }
}

pub fn analyze_formatting(text: &str) -> Formatting {
    let lines: Vec<&str> = text.split('\n').collect();
    let bullets = lines
        .iter()
        .filter(|line| line.trim().starts_with(BULLET_MARKERS))
        .count();

    let bullet_ratio = if lines.is_empty() {
        0.0
    } else {
        bullets as f64 / lines.len() as f64
    };

    Formatting {
        bullet_points_detected: bullets > 3,
        bullet_ratio: round_to(bullet_ratio, 2),
    }
}

/// Resumes average roughly 400 words per page; 0.5–2.5 pages is acceptable.
pub fn estimate_page_count(text: &str) -> PageCheck {
    let word_count = word_count(text);
    let estimated_pages = word_count as f64 / WORDS_PER_PAGE;
    let is_appropriate_length = (0.5..=2.5).contains(&estimated_pages);

    PageCheck {
        word_count,
        estimated_pages: round_to(estimated_pages, 1),
        is_appropriate_length,
        feedback: if is_appropriate_length {
            "Good length"
        } else {
            "Review length"
        }
        .to_string(),
    }
}

/// Dates are consistent when one style (MM/YYYY vs "Month YYYY") covers
/// more than 80% of all matches.
pub fn check_date_consistency(text: &str) -> DateConsistency {
    let slash = slash_date_pattern().find_iter(text).count();
    let month = month_date_pattern().find_iter(text).count();
    let total = slash + month;

    if total == 0 {
        return DateConsistency {
            is_consistent: false,
            dominant_format: "None found".to_string(),
            mixed_usage_warning: false,
        };
    }

    let ratio_slash = slash as f64 / total as f64;
    let is_consistent = ratio_slash > 0.8 || ratio_slash < 0.2;
    let dominant_format = if ratio_slash > 0.5 {
        "MM/YYYY"
    } else {
        "Month YYYY"
    };

    DateConsistency {
        is_consistent,
        dominant_format: dominant_format.to_string(),
        mixed_usage_warning: !is_consistent,
    }
}

/// Extracted text loses layout coordinates, but multi-column and table layouts
/// leave runs of 4+ spaces between words on the same line.
pub fn detect_tables_columns(text: &str) -> ComplexLayout {
    let lines_with_gaps = text
        .split('\n')
        .filter(|line| column_gap_pattern().is_match(line))
        .count();

    ComplexLayout {
        potential_tables: lines_with_gaps > 3,
        lines_with_gaps,
    }
}

pub fn check_buzzwords(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    BUZZWORDS
        .iter()
        .filter(|phrase| text_lower.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Flags emoji-heavy text and icon-font glyphs from the Private Use Area.
pub fn check_special_chars(text: &str) -> SpecialChars {
    let mut total = 0usize;
    let mut non_ascii = 0usize;
    let mut pua_chars_found = 0usize;

    for c in text.chars() {
        total += 1;
        let code = c as u32;
        if code > 127 {
            non_ascii += 1;
        }
        if PUA_RANGE.contains(&code) {
            pua_chars_found += 1;
        }
    }

    let ratio = if total == 0 {
        0.0
    } else {
        non_ascii as f64 / total as f64
    };
    let has_special_chars = ratio > NON_ASCII_RATIO_LIMIT || pua_chars_found > 0;

    SpecialChars {
        has_special_chars,
        non_ascii_ratio: round_to(ratio, 2),
        pua_chars_found,
        feedback: if has_special_chars {
            "Remove icons or emojis"
        } else {
            "Clean text"
        }
        .to_string(),
    }
}

/// A size of 0 means the resume was pasted as text, so there is nothing to check.
pub fn check_file_size(size_bytes: u64) -> FileSizeCheck {
    if size_bytes == 0 {
        return FileSizeCheck {
            is_valid: true,
            size_mb: None,
            feedback: "Skipped (Text input)".to_string(),
        };
    }

    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    let is_valid = size_mb <= MAX_FILE_SIZE_MB;

    FileSizeCheck {
        is_valid,
        size_mb: Some(round_to(size_mb, 2)),
        feedback: if is_valid {
            "File size OK"
        } else {
            "File too large (>2MB)"
        }
        .to_string(),
    }
}

/// Rounds half to even, so 0.25 reports as 0.2.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_parsing_requires_more_than_50_words() {
        assert!(!validate_parsing(&words(50)));
        assert!(validate_parsing(&words(51)));
        assert!(!validate_parsing(""));
    }

    #[test]
    fn test_section_headers_are_case_insensitive() {
        let headers = check_section_headers("WORK EXPERIENCE\nEducation\n");
        assert_eq!(headers.get("experience"), Some(&true));
        assert_eq!(headers.get("education"), Some(&true));
        assert_eq!(headers.get("skills"), Some(&false));
    }

    #[test]
    fn test_contact_info_detects_all_channels() {
        let text = "jane@example.com | 555-123-4567 | linkedin.com/in/jane-doe | github.com/janedoe";
        let contact = check_contact_info(text);
        assert!(contact.email_found);
        assert!(contact.phone_found);
        assert!(contact.linkedin_found);
        assert!(contact.github_found);
        assert_eq!(contact.email_feedback, "Looks professional");
        assert_eq!(contact.phone_feedback, "Standard Format");
    }

    #[test]
    fn test_email_with_many_digits_gets_warning() {
        let contact = check_contact_info("reach me at jane19951234@example.com");
        assert_eq!(contact.email_feedback, "Professionalism warning (digits)");
    }

    #[test]
    fn test_missing_contact_info_reports_not_found() {
        let contact = check_contact_info("no contact details here");
        assert!(!contact.email_found);
        assert!(!contact.phone_found);
        assert_eq!(contact.email_feedback, "Not found");
        assert_eq!(contact.phone_feedback, "Not found");
    }

    #[test]
    fn test_international_phone_is_standard() {
        let contact = check_contact_info("Phone: +44 (020) 555 1234");
        assert!(contact.phone_found);
        assert_eq!(contact.phone_feedback, "Standard Format");
    }

    #[test]
    fn test_bullets_need_more_than_three_lines() {
        let three = "Intro\n- one\n• two\n* three";
        assert!(!analyze_formatting(three).bullet_points_detected);

        let four = "Intro\n- one\n• two\n* three\n   ➢ four";
        let formatting = analyze_formatting(four);
        assert!(formatting.bullet_points_detected);
        assert_eq!(formatting.bullet_ratio, 0.8);
    }

    #[test]
    fn test_empty_text_has_one_line_and_zero_ratio() {
        let formatting = analyze_formatting("");
        assert!(!formatting.bullet_points_detected);
        assert_eq!(formatting.bullet_ratio, 0.0);
    }

    #[test]
    fn test_200_words_is_half_a_page_and_appropriate() {
        let page = estimate_page_count(&words(200));
        assert_eq!(page.word_count, 200);
        assert_eq!(page.estimated_pages, 0.5);
        assert!(page.is_appropriate_length);
        assert_eq!(page.feedback, "Good length");
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        assert_eq!(estimate_page_count(&words(100)).estimated_pages, 0.2);
        assert_eq!(estimate_page_count(&words(500)).estimated_pages, 1.2);

        let one_in_eight = "- shipped\nline\nline\nline\nline\nline\nline\nline";
        assert_eq!(analyze_formatting(one_in_eight).bullet_ratio, 0.12);
    }

    #[test]
    fn test_page_bounds() {
        assert!(!estimate_page_count(&words(199)).is_appropriate_length);
        assert!(estimate_page_count(&words(1000)).is_appropriate_length);
        assert!(!estimate_page_count(&words(1001)).is_appropriate_length);
    }

    #[test]
    fn test_mostly_slash_dates_are_consistent() {
        let mut text = (1..=9)
            .map(|m| format!("0{m}/2020"))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(", January 2019");

        let dates = check_date_consistency(&text);
        assert!(dates.is_consistent);
        assert_eq!(dates.dominant_format, "MM/YYYY");
        assert!(!dates.mixed_usage_warning);
    }

    #[test]
    fn test_mixed_dates_are_flagged() {
        let dates = check_date_consistency("01/2020 - 05/2021, Jan 2019 - sept 2019");
        assert!(!dates.is_consistent);
        assert_eq!(dates.dominant_format, "Month YYYY");
        assert!(dates.mixed_usage_warning);
    }

    #[test]
    fn test_no_dates_found() {
        let dates = check_date_consistency("no dates at all");
        assert!(!dates.is_consistent);
        assert_eq!(dates.dominant_format, "None found");
    }

    #[test]
    fn test_gapped_lines_suggest_tables() {
        let text = "Rust     Go\nPython     Java\nSQL     Bash\nAWS     GCP\nplain line";
        let layout = detect_tables_columns(text);
        assert_eq!(layout.lines_with_gaps, 4);
        assert!(layout.potential_tables);

        let leading = "    indented line\ntrailing    \n";
        assert_eq!(detect_tables_columns(leading).lines_with_gaps, 0);
    }

    #[test]
    fn test_buzzwords_are_reported_in_list_order_once() {
        let found = check_buzzwords("Synergy! A TEAM PLAYER and team player.");
        assert_eq!(found, vec!["team player".to_string(), "synergy".to_string()]);
    }

    #[test]
    fn test_special_chars_ratio_and_pua() {
        let clean = check_special_chars("plain ascii text");
        assert!(!clean.has_special_chars);
        assert_eq!(clean.feedback, "Clean text");

        let icon = check_special_chars("\u{f0e0} jane@example.com and a lot more ascii text here");
        assert!(icon.has_special_chars);
        assert_eq!(icon.pua_chars_found, 1);

        let emoji = check_special_chars("🚀🚀🚀");
        assert!(emoji.has_special_chars);
        assert_eq!(emoji.non_ascii_ratio, 1.0);

        assert_eq!(check_special_chars("").non_ascii_ratio, 0.0);
    }

    #[test]
    fn test_file_size_limits() {
        let skipped = check_file_size(0);
        assert!(skipped.is_valid);
        assert_eq!(skipped.size_mb, None);
        assert_eq!(skipped.feedback, "Skipped (Text input)");

        assert!(check_file_size(2 * 1024 * 1024).is_valid);

        let too_big = check_file_size(2 * 1024 * 1024 + 1);
        assert!(!too_big.is_valid);
        assert_eq!(too_big.feedback, "File too large (>2MB)");
    }
}
