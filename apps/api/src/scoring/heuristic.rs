//! Local fallback score used when no provider produced a usable evaluation.
//!
//! 50 base points, up to 30 for job-description keyword coverage and up to 20
//! for section coverage, truncated and capped at 100.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

const BASE_SCORE: f64 = 50.0;
const KEYWORD_WEIGHT: f64 = 30.0;
const SECTION_WEIGHT: f64 = 20.0;

pub const HEURISTIC_SECTIONS: [&str; 5] = ["education", "experience", "skills", "projects", "summary"];

const STOPWORDS: [&str; 12] = [
    "The", "A", "An", "In", "On", "To", "For", "Of", "With", "At", "By", "From",
];

fn capitalized_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][a-zA-Z]+\b").expect("valid regex"))
}

/// Distinct capitalized words of a job description, minus common stopwords.
pub fn extract_keywords(job_description: &str) -> BTreeSet<String> {
    capitalized_word()
        .find_iter(job_description)
        .map(|m| m.as_str())
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

pub fn heuristic_score(resume_text: &str, job_description: Option<&str>) -> u32 {
    let text_lower = resume_text.to_lowercase();
    let mut score = BASE_SCORE;

    if let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) {
        let keywords = extract_keywords(jd);
        if !keywords.is_empty() {
            // Both sides are lowercased; a capitalized keyword would never
            // match the lowercased text.
            let matched = keywords
                .iter()
                .filter(|k| text_lower.contains(&k.to_lowercase()))
                .count();
            score += (matched as f64 / keywords.len() as f64) * KEYWORD_WEIGHT;
        }
    }

    let found_sections = HEURISTIC_SECTIONS
        .iter()
        .filter(|section| text_lower.contains(*section))
        .count();
    score += (found_sections as f64 / HEURISTIC_SECTIONS.len() as f64) * SECTION_WEIGHT;

    (score as u32).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_drops_stopwords_and_duplicates() {
        let keywords = extract_keywords("The Rust team. Rust With Kubernetes and Terraform at A scale");
        assert_eq!(
            keywords.into_iter().collect::<Vec<_>>(),
            vec!["Kubernetes", "Rust", "Terraform"]
        );
    }

    #[test]
    fn test_single_letter_words_are_not_keywords() {
        assert!(extract_keywords("C I O").is_empty());
    }

    #[test]
    fn test_sections_only() {
        let text = "Summary\nExperience\nEducation\nSkills\nProjects";
        assert_eq!(heuristic_score(text, None), 70);
        assert_eq!(heuristic_score("nothing relevant here", None), 50);
    }

    #[test]
    fn test_keyword_coverage_is_case_insensitive() {
        let text = "experience with rust and kubernetes";
        // 2 of 3 keywords (+20) and 1 of 5 sections (+4)
        assert_eq!(
            heuristic_score(text, Some("Rust Kubernetes Terraform")),
            74
        );
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        assert_eq!(heuristic_score("skills", Some("  ")), 54);
    }

    #[test]
    fn test_heuristic_caps_at_100() {
        let text = "summary experience education skills projects rust";
        assert_eq!(heuristic_score(text, Some("Rust")), 100);
    }
}
