use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::github::RetryPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_CONTRIBUTIONS_URL: &str = "https://github-contributions-api.jogruber.de/v4";
pub const DEFAULT_TARGET_YEAR: i32 = 2025;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub contributions_url: String,
    pub github_token: Option<String>,
    pub target_year: i32,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_jitter_ms: u64,
    pub enrich_top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("WRAP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let contributions_url = env::var("CONTRIBUTIONS_API_URL")
            .unwrap_or_else(|_| DEFAULT_CONTRIBUTIONS_URL.to_string());

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            api_url,
            contributions_url,
            github_token,
            target_year: parse_var("WRAP_YEAR", DEFAULT_TARGET_YEAR)?,
            max_retries: parse_var("MAX_RETRIES", 3)?,
            retry_base_delay_ms: parse_var("RETRY_BASE_DELAY_MS", 1000)?,
            retry_max_jitter_ms: parse_var("RETRY_MAX_JITTER_MS", 1000)?,
            enrich_top_n: parse_var("ENRICH_TOP_N", 3)?,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_jitter: Duration::from_millis(self.retry_max_jitter_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            contributions_url: DEFAULT_CONTRIBUTIONS_URL.to_string(),
            github_token: None,
            target_year: DEFAULT_TARGET_YEAR,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            retry_max_jitter_ms: 1000,
            enrich_top_n: 3,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub target_year: i32,
    pub enrich_top_n: usize,
    pub top_languages: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            target_year: config.target_year,
            enrich_top_n: config.enrich_top_n,
            top_languages: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.target_year, 2025);
        assert_eq!(pipeline.enrich_top_n, 3);
        assert_eq!(pipeline.top_languages, 5);

        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("GITWRAP_TEST_BAD_NUMBER", "three");
        let parsed: Result<u32> = parse_var("GITWRAP_TEST_BAD_NUMBER", 3);
        assert!(matches!(parsed, Err(Error::Config(_))));

        let missing: u32 = parse_var("GITWRAP_TEST_UNSET_NUMBER", 7).unwrap();
        assert_eq!(missing, 7);
    }
}
