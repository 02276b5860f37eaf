//! Scoring pipeline: mechanical analysis, AI evaluation through the router,
//! then score blending. Never fails: when no provider answers with a usable
//! evaluation, the report falls back to mechanical checks plus heuristics.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::compliance::{analyze_mechanical, ComplianceReport};
use crate::llm_client::{Provider, ProviderPreference, ProviderRouter};
use crate::models::metadata::DocumentMetadata;
use crate::scoring::evaluation::{
    parse_evaluation, AiAssessment, ContentAnalysis, EvaluationResult, Keywords,
};
use crate::scoring::heuristic::heuristic_score;
use crate::scoring::prompts::build_evaluate_prompt;

const AI_WEIGHT: f64 = 0.8;
const AI_MECHANICAL_WEIGHT: f64 = 0.2;
const FALLBACK_MECHANICAL_WEIGHT: f64 = 0.4;
const FALLBACK_HEURISTIC_WEIGHT: f64 = 0.6;

const REJECTED_SUMMARY: &str = "Content too short or unreadable.";
const REJECTED_FEEDBACK: [&str; 2] = [
    "Input is too short to analyze.",
    "Please upload a valid resume with at least 50 words.",
];
const AI_DEFAULT_SUMMARY: &str = "Analysis complete.";
const FALLBACK_SUMMARY: &str =
    "AI Analysis Unavailable. Score based on mechanical checks and heuristics.";
const FALLBACK_FEEDBACK: [&str; 2] = [
    "Configure AI keys for detailed analysis.",
    "Ensure standard section headers are used.",
];

/// Which path produced the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerBackend {
    Ai,
    Heuristic,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalScoreReport {
    pub score: u32, // 0 – 100
    pub summary: String,
    pub section_scores: BTreeMap<String, u32>,
    pub keywords: Keywords,
    /// `None` unless an AI evaluation was used.
    pub content_analysis: Option<ContentAnalysis>,
    pub compliance: ComplianceReport,
    pub feedback: Vec<String>,
    pub scorer_backend: ScorerBackend,
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_unavailable_reason: Option<String>,
}

pub struct ScoringOrchestrator {
    router: Arc<ProviderRouter>,
}

impl ScoringOrchestrator {
    pub fn new(router: Arc<ProviderRouter>) -> Self {
        Self { router }
    }

    pub async fn score(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
        metadata: Option<&DocumentMetadata>,
    ) -> FinalScoreReport {
        let compliance = analyze_mechanical(resume_text, metadata);

        if !compliance.parsing_valid {
            info!(
                "Rejecting input with {} words before AI scoring",
                compliance.page_check.word_count
            );
            return rejected_report(compliance);
        }

        let report = match self.assess(resume_text, job_description).await {
            AiAssessment::Available { provider, result } => {
                blend_with_ai(compliance, provider, result)
            }
            AiAssessment::Unavailable(reason) => {
                warn!("AI scoring unavailable, using heuristics: {reason}");
                heuristic_report(compliance, resume_text, job_description, reason)
            }
        };

        info!(
            "Scoring complete: {} ({:?})",
            report.score, report.scorer_backend
        );
        report
    }

    async fn assess(&self, resume_text: &str, job_description: Option<&str>) -> AiAssessment {
        let prompt = build_evaluate_prompt(resume_text, job_description);

        let generation = match self.router.route(ProviderPreference::Auto, &prompt).await {
            Ok(generation) => generation,
            Err(e) => return AiAssessment::Unavailable(e.to_string()),
        };

        match parse_evaluation(&generation.text) {
            Ok(result) => AiAssessment::Available {
                provider: generation.provider,
                result,
            },
            Err(e) => AiAssessment::Unavailable(format!(
                "{} returned a malformed evaluation: {e}",
                generation.provider
            )),
        }
    }
}

fn rejected_report(compliance: ComplianceReport) -> FinalScoreReport {
    let section_scores = ["experience", "skills", "education", "formatting", "mechanical_compliance"]
        .into_iter()
        .map(|section| (section.to_string(), 0))
        .collect();

    FinalScoreReport {
        score: 0,
        summary: REJECTED_SUMMARY.to_string(),
        section_scores,
        keywords: Keywords::default(),
        content_analysis: None,
        compliance,
        feedback: REJECTED_FEEDBACK.iter().map(|s| s.to_string()).collect(),
        scorer_backend: ScorerBackend::Rejected,
        provider: None,
        ai_unavailable_reason: None,
    }
}

fn blend_with_ai(
    compliance: ComplianceReport,
    provider: Provider,
    result: EvaluationResult,
) -> FinalScoreReport {
    let mechanical = compliance.mechanical_score;
    let blended = result.score as f64 * AI_WEIGHT + mechanical as f64 * AI_MECHANICAL_WEIGHT;

    let mut section_scores = result.section_scores;
    section_scores.insert("mechanical_compliance".to_string(), mechanical);

    FinalScoreReport {
        score: (blended as u32).min(100),
        summary: result
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| AI_DEFAULT_SUMMARY.to_string()),
        section_scores,
        keywords: result.keywords,
        content_analysis: Some(result.content_analysis),
        compliance,
        feedback: result.feedback,
        scorer_backend: ScorerBackend::Ai,
        provider: Some(provider),
        ai_unavailable_reason: None,
    }
}

fn heuristic_report(
    compliance: ComplianceReport,
    resume_text: &str,
    job_description: Option<&str>,
    reason: String,
) -> FinalScoreReport {
    let mechanical = compliance.mechanical_score;
    let heuristic = heuristic_score(resume_text, job_description);
    let blended = mechanical as f64 * FALLBACK_MECHANICAL_WEIGHT
        + heuristic as f64 * FALLBACK_HEURISTIC_WEIGHT;

    let section_scores = BTreeMap::from([
        ("mechanical_compliance".to_string(), mechanical),
        ("heuristic_keywords".to_string(), heuristic),
    ]);

    FinalScoreReport {
        score: (blended as u32).min(100),
        summary: FALLBACK_SUMMARY.to_string(),
        section_scores,
        keywords: Keywords::default(),
        content_analysis: None,
        compliance,
        feedback: FALLBACK_FEEDBACK.iter().map(|s| s.to_string()).collect(),
        scorer_backend: ScorerBackend::Heuristic,
        provider: None,
        ai_unavailable_reason: Some(reason),
    }
}
