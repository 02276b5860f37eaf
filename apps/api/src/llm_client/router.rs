//! Priority ordering and failover across the configured backends.
//!
//! A provider is available iff its API key was set at startup. Every request
//! tries the selected provider first, then each remaining available provider
//! once, in priority order. Failures are values: the router never panics and
//! never returns a sentinel string.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm_client::chat_completions::ChatCompletionsProvider;
use crate::llm_client::gemini::GeminiProvider;
use crate::llm_client::{Provider, ProviderPreference, TextGenerator, DEFAULT_PRIORITY};

/// Message surfaced to callers when no backend produced an answer.
pub const ALL_PROVIDERS_FAILED: &str =
    "All AI providers failed. Please check your API keys and try again.";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No AI provider configured (set GROQ_API_KEY, GEMINI_API_KEY or OPENAI_API_KEY)")]
    NoProviderAvailable,

    #[error("All AI providers failed. Please check your API keys and try again.")]
    AllProvidersFailed { failures: Vec<ProviderFailure> },
}

/// One skipped backend on the way to a result (or to total failure).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderFailure {
    pub provider: Provider,
    pub error: String,
}

/// A successful routed completion.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub provider: Provider,
    pub text: String,
    pub fallbacks: Vec<ProviderFailure>,
}

pub struct ProviderRouter {
    priority: Vec<Provider>,
    generators: HashMap<Provider, Arc<dyn TextGenerator>>,
}

impl ProviderRouter {
    /// `priority` is deduplicated; providers it leaves out are appended in
    /// default order so every backend has a rank.
    pub fn new(generators: Vec<Arc<dyn TextGenerator>>, priority: Vec<Provider>) -> Self {
        let mut ranked: Vec<Provider> = Vec::with_capacity(DEFAULT_PRIORITY.len());
        for provider in priority.into_iter().chain(DEFAULT_PRIORITY) {
            if !ranked.contains(&provider) {
                ranked.push(provider);
            }
        }

        let generators = generators
            .into_iter()
            .map(|generator| (generator.provider(), generator))
            .collect();

        Self {
            priority: ranked,
            generators,
        }
    }

    /// Builds one client per configured API key. Missing keys disable the
    /// provider; they are never fatal.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.provider_timeout)
            .build()
            .context("Failed to build provider HTTP client")?;

        let mut generators: Vec<Arc<dyn TextGenerator>> = Vec::new();
        for provider in DEFAULT_PRIORITY {
            let Some(api_key) = config.api_key(provider) else {
                warn!("{} not set, {provider} disabled", provider.env_key());
                continue;
            };

            let api_key = api_key.to_string();
            let generator: Arc<dyn TextGenerator> = match provider {
                Provider::Groq => Arc::new(ChatCompletionsProvider::groq(api_key, client.clone())),
                Provider::Gemini => Arc::new(GeminiProvider::new(api_key, client.clone())),
                Provider::OpenAi => {
                    Arc::new(ChatCompletionsProvider::openai(api_key, client.clone()))
                }
            };
            info!("{provider} API key loaded");
            generators.push(generator);
        }

        let router = Self::new(generators, config.provider_priority.clone());
        if router.available().is_empty() {
            warn!("No AI provider configured; scoring will use heuristics only");
        } else {
            info!("Provider priority: {:?}", router.available());
        }
        Ok(router)
    }

    /// Available providers in priority order.
    pub fn available(&self) -> Vec<Provider> {
        self.priority
            .iter()
            .copied()
            .filter(|p| self.generators.contains_key(p))
            .collect()
    }

    pub fn is_available(&self, provider: Provider) -> bool {
        self.generators.contains_key(&provider)
    }

    /// Resolves a preference to a concrete provider.
    ///
    /// An explicit, available provider is honored unless it is the
    /// lowest-priority one, which resolves like `Auto`. `Auto` and
    /// unavailable providers resolve to the best available provider.
    pub fn select_provider(&self, preference: ProviderPreference) -> Result<Provider, RouteError> {
        let available = self.available();
        let best = *available.first().ok_or(RouteError::NoProviderAvailable)?;

        match preference {
            ProviderPreference::Explicit(provider)
                if self.is_available(provider) && self.priority.last() != Some(&provider) =>
            {
                Ok(provider)
            }
            _ => Ok(best),
        }
    }

    /// The order in which `route` will try providers for `preference`.
    pub fn candidates(&self, preference: ProviderPreference) -> Result<Vec<Provider>, RouteError> {
        let selected = self.select_provider(preference)?;
        let mut order = vec![selected];
        order.extend(self.available().into_iter().filter(|p| *p != selected));
        Ok(order)
    }

    /// Sends `prompt` to each candidate in turn until one succeeds.
    pub async fn route(
        &self,
        preference: ProviderPreference,
        prompt: &str,
    ) -> Result<Generation, RouteError> {
        let candidates = self.candidates(preference)?;
        info!(
            "Routing to {} ({} chars, {} candidates)",
            candidates[0],
            prompt.len(),
            candidates.len()
        );

        let mut fallbacks = Vec::new();
        for provider in candidates {
            let Some(generator) = self.generators.get(&provider) else {
                continue;
            };

            match generator.generate(prompt).await {
                Ok(text) => {
                    if !fallbacks.is_empty() {
                        info!("{provider} succeeded after {} fallback(s)", fallbacks.len());
                    }
                    return Ok(Generation {
                        provider,
                        text,
                        fallbacks,
                    });
                }
                Err(e) => {
                    warn!("{provider} failed, trying next provider: {e}");
                    fallbacks.push(ProviderFailure {
                        provider,
                        error: e.to_string(),
                    });
                }
            }
        }

        error!("All AI providers failed ({} attempted)", fallbacks.len());
        Err(RouteError::AllProvidersFailed {
            failures: fallbacks,
        })
    }
}
