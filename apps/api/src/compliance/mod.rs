// Mechanical compliance: deterministic, pattern-based resume checks.
// No LLM calls here — the scoring module blends this report with AI judgment.

pub mod analyzer;
pub mod checks;
pub mod handlers;

pub use analyzer::{analyze_mechanical, ComplianceReport};
