// Evaluate-against-job-description prompt for the scoring pipeline.
// The JSON schema here must stay in sync with `evaluation::EvaluationResult`.

/// Context line used when no job description is supplied.
pub const GENERAL_STANDARDS: &str = "General Professional Standards";

/// Builds the evaluation prompt. An empty or absent job description scores
/// against general professional standards.
pub fn build_evaluate_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let context = match job_description {
        Some(jd) if !jd.trim().is_empty() => format!("Job Description: {jd}"),
        _ => GENERAL_STANDARDS.to_string(),
    };

    format!(
        r#"Your task is to analyze the resume using Advanced Keyword Optimization criteria:

1. Weighted Keyword Analysis:
   - Critical Skills: Must-have requirements from the Context (JD). Heavy penalty if missing.
   - Recommended Skills: Nice-to-have keywords. Moderate impact.
   - Hard vs Soft Skills: Separate skills into Technical/Hard vs Soft. Prioritize Hard Skills.

2. Keyword Optimization Checks:
   - Placement: Are keywords in Headers/Summary (High Impact) or just Body?
   - Density & Stuffing: Flag if a keyword is repeated unnaturally (>5 times). Ideal density is 1-3%.
   - Acronyms: Check if acronyms are defined (e.g., "ML (Machine Learning)").
   - Synonyms: meaningful variations (e.g., JD says "Python", Resume says "Pythonic" -> Match).

3. Section-Level Scoring:
   - Experience (40%): Action Verbs, Metrics/Quantification.
   - Skills (30%): Relevance to JD.
   - Education (15%): Recency, GPA, Coursework.
   - Formatting (15%): Readability.

4. Content Quality & Structure:
   - Action Verbs: Strong start? Flag passive voice.
   - Quantification: Numbers?
   - Grammar & Spelling: Flag errors.
   - Logic & Flow: Is experience in Reverse Chronological Order?
   - Buzzwords: "Hard worker" vs specific traits.

Context: 
{context}

Resume Content:
{resume_text}

Provide the output in this STRICT JSON format:
{{
    "score": <0-100>,
    "summary": "<2-3 sentence overall assessment>",
    "section_scores": {{ "experience": <0-100>, "skills": <0-100>, "education": <0-100>, "formatting": <0-100> }},
    "keywords": {{
        "critical_missing": ["<must_have>"],
        "recommended_missing": ["<nice_to_have>"],
        "hard_skills": ["<tech_skill>"],
        "soft_skills": ["<soft_skill>"],
        "keyword_stuffing_detected": ["<word>"],
        "acronym_warnings": ["<acronym>"]
    }},
    "content_analysis": {{
        "action_verbs": "<Strong/Weak>",
        "quantification_score": <0-10>,
        "buzzwords_found": ["<cliche>"],
        "education_feedback": ["<point>"],
        "skill_proficiency": {{ "expert": [], "intermediate": [], "beginner": [] }},
        "keyword_placement_score": <0-10>,
        "spelling_errors": ["<typo_1>", "<typo_2>"],
        "reverse_chronological_check": "<Pass/Fail - Details>"
    }},
    "feedback": ["<point_1>", "Grammar: <issue>", "Flow: <issue>"]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_job_description() {
        let prompt = build_evaluate_prompt("resume body", Some("Senior Rust Engineer"));
        assert!(prompt.contains("Context: \nJob Description: Senior Rust Engineer\n"));
        assert!(prompt.contains("Resume Content:\nresume body\n"));
    }

    #[test]
    fn test_blank_job_description_uses_general_standards() {
        for jd in [None, Some(""), Some("   ")] {
            let prompt = build_evaluate_prompt("resume body", jd);
            assert!(prompt.contains(GENERAL_STANDARDS));
            assert!(!prompt.contains("Job Description:"));
        }
    }

    #[test]
    fn test_prompt_schema_braces_are_literal() {
        let prompt = build_evaluate_prompt("x", None);
        assert!(prompt.contains("\"section_scores\": { \"experience\": <0-100>"));
        assert!(prompt.trim_end().ends_with('}'));
    }
}
