//! In-place retry for rate-limited providers.
//!
//! A rate-limited attempt waits `backoff * attempt` before the next one
//! (15s, then 30s by default). The wait is a tokio timer, so dropping the
//! request future cancels it. Any other failure is returned immediately so
//! the router can fail over.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::llm_client::{Provider, ProviderError};

pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(15);
pub const RATE_LIMIT_ATTEMPTS: u32 = 2;

pub async fn retry_on_rate_limit<F, Fut>(
    provider: Provider,
    max_attempts: u32,
    backoff: Duration,
    mut call: F,
) -> Result<String, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<String, ProviderError>>,
{
    for attempt in 1..=max_attempts {
        info!("Calling {provider} (attempt {attempt}/{max_attempts})");

        match call(attempt).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_rate_limited() => {
                let wait = backoff * attempt;
                warn!(
                    "{provider} rate limited on attempt {attempt}/{max_attempts}, waiting {}s: {e}",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }

    Err(ProviderError::RateLimited {
        retries: max_attempts,
    })
}
