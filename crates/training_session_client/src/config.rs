use crate::TrainingSessionError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://toto-nodems-training-session:8080";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header when present.
    pub auth: Option<SecretString>,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            auth: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, TrainingSessionError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, TrainingSessionError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = get("TRAINING_SESSION_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let auth = get("TRAINING_SESSION_AUTH")
            .filter(|s| !s.trim().is_empty())
            .map(|s| SecretString::new(s.into()));
        let timeout = match get("TRAINING_SESSION_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("TRAINING_SESSION_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };
        let max_retries = match get("TRAINING_SESSION_MAX_RETRIES") {
            Some(raw) => parse_number("TRAINING_SESSION_MAX_RETRIES", &raw)?,
            None => defaults.max_retries,
        };
        Ok(Self {
            base_url,
            auth,
            timeout,
            max_retries,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, TrainingSessionError> {
    raw.trim()
        .parse()
        .map_err(|_| TrainingSessionError::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}
