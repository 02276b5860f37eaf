use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{Provider, DEFAULT_PRIORITY};

/// Application configuration loaded from environment variables.
/// Provider keys are optional: a missing key only disables that provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub groq_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub provider_priority: Vec<Provider>,
    pub provider_timeout: Duration,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            groq_api_key: None,
            gemini_api_key: None,
            openai_api_key: None,
            provider_priority: DEFAULT_PRIORITY.to_vec(),
            provider_timeout: Duration::from_secs(120),
            output_dir: PathBuf::from("output"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            groq_api_key: optional_env("GROQ_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            provider_priority: match optional_env("PROVIDER_PRIORITY") {
                Some(raw) => parse_priority(&raw)?,
                None => defaults.provider_priority,
            },
            provider_timeout: Duration::from_secs(parse_env(
                "PROVIDER_TIMEOUT_SECS",
                defaults.provider_timeout.as_secs(),
            )?),
            output_dir: optional_env("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }

    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Groq => self.groq_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenAi => self.openai_api_key.as_deref(),
        }
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// Parses a comma-separated provider list such as `gemini,groq`.
fn parse_priority(raw: &str) -> Result<Vec<Provider>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<Provider>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()
        .context("PROVIDER_PRIORITY must list groq, gemini and/or openai")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority_accepts_partial_lists() {
        assert_eq!(
            parse_priority("gemini, OpenAI").unwrap(),
            vec![Provider::Gemini, Provider::OpenAi]
        );
        assert_eq!(parse_priority("groq,,").unwrap(), vec![Provider::Groq]);
    }

    #[test]
    fn test_parse_priority_rejects_unknown_names() {
        assert!(parse_priority("groq,claude").is_err());
    }

    #[test]
    fn test_api_key_lookup_by_provider() {
        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(Provider::OpenAi), Some("sk-test"));
        assert_eq!(config.api_key(Provider::Groq), None);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.provider_priority, DEFAULT_PRIORITY.to_vec());
        assert_eq!(config.provider_timeout, Duration::from_secs(120));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }
}
