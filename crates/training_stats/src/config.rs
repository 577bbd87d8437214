use std::net::SocketAddr;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(String);

/// Settings of the HTTP service itself. Upstream settings live in
/// [`training_session_client::config::Config`].
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub timezone: Tz,
    /// Intensity window used when the request has no `days` parameter.
    pub default_days: u32,
    /// Widest window a request may ask for, via `days` or `dateFrom`.
    pub max_days: u32,
    /// Exercise fetches allowed in flight per request.
    pub fetch_concurrency: usize,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            timezone: chrono_tz::Europe::Rome,
            default_days: 10,
            max_days: 730,
            fetch_concurrency: 8,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = get("ADDRESS") {
            cfg.address = parse("ADDRESS", &raw)?;
        }
        if let Some(raw) = get("TRAINING_STATS_TIMEZONE") {
            cfg.timezone = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError(format!("TRAINING_STATS_TIMEZONE: unknown timezone {raw:?}")))?;
        }
        if let Some(raw) = get("TRAINING_STATS_DEFAULT_DAYS") {
            cfg.default_days = parse("TRAINING_STATS_DEFAULT_DAYS", &raw)?;
        }
        if let Some(raw) = get("TRAINING_STATS_MAX_DAYS") {
            cfg.max_days = parse("TRAINING_STATS_MAX_DAYS", &raw)?;
        }
        if cfg.default_days > cfg.max_days {
            return Err(ConfigError(format!(
                "TRAINING_STATS_DEFAULT_DAYS ({}) exceeds TRAINING_STATS_MAX_DAYS ({})",
                cfg.default_days, cfg.max_days
            )));
        }
        if let Some(raw) = get("TRAINING_STATS_FETCH_CONCURRENCY") {
            cfg.fetch_concurrency = parse("TRAINING_STATS_FETCH_CONCURRENCY", &raw)?;
            if cfg.fetch_concurrency == 0 {
                return Err(ConfigError("TRAINING_STATS_FETCH_CONCURRENCY must be at least 1".into()));
            }
        }
        if let Some(raw) = get("TRAINING_STATS_REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout =
                Duration::from_secs(parse("TRAINING_STATS_REQUEST_TIMEOUT_SECS", &raw)?);
        }
        Ok(cfg)
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError(format!("{key}: invalid value {raw:?}")))
}
