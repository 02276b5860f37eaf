// ATS scoring pipeline.
// Mechanical compliance + AI evaluation, blended; heuristic fallback when no
// provider answers. All LLM calls go through llm_client::ProviderRouter.

pub mod evaluation;
pub mod handlers;
pub mod heuristic;
pub mod orchestrator;
pub mod prompts;

pub use orchestrator::{FinalScoreReport, ScorerBackend, ScoringOrchestrator};
