// Resume text enhancement and resume-aware chat.
// Both are single routed completions; provider failover is the router's job.

pub mod handlers;
pub mod prompts;
pub mod service;
