//! HTTP client implementation for the training session microservice.
//!
//! This module provides a reqwest-based implementation of the
//! [`TrainingSessionClient`](crate::TrainingSessionClient) trait.

use crate::config::Config;
use crate::retry::RetryPolicy;
use crate::{Session, SessionExercises, TrainingSessionClient, TrainingSessionError, lenient_list};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::{RngExt, rng};
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const MESSAGE_ID_HEADER: &str = "x-msg-id";

/// Client for the training session API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestTrainingSessionClient {
    base_url: Url,
    auth: Option<SecretString>,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl ReqwestTrainingSessionClient {
    /// Create a client with default timeout and retry settings.
    ///
    /// # Arguments
    /// * `base_url` - Root of the training session API (e.g. "http://toto-nodems-training-session:8080")
    pub fn new(base_url: &str) -> Result<Self, TrainingSessionError> {
        Self::from_config(&Config {
            base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TrainingSessionError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| TrainingSessionError::Config(format!("invalid base url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TrainingSessionError::Config(format!(
                "base url {:?} cannot carry paths",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url,
            auth: config.auth.clone(),
            retry: RetryPolicy::with_max_retries(config.max_retries),
            client,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a GET request carrying the tracing and auth headers.
    fn get_request(&self, url: Url, correlation_id: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CORRELATION_ID_HEADER, correlation_id)
            .header(MESSAGE_ID_HEADER, message_id(correlation_id));
        if let Some(auth) = &self.auth {
            if let Ok(value) = HeaderValue::from_str(auth.expose_secret()) {
                req = req.header(AUTHORIZATION, value);
            }
        }
        req
    }

    /// GET a JSON document, retrying transient failures.
    async fn get_json(
        &self,
        url: Url,
        query: &[(&str, String)],
        correlation_id: &str,
    ) -> Result<serde_json::Value, TrainingSessionError> {
        self.retry
            .retry_when(
                || {
                    let req = self.get_request(url.clone(), correlation_id).query(query);
                    let path = url.path().to_string();
                    async move {
                        tracing::debug!(%correlation_id, "GET {}", path);
                        let resp = req.send().await?;
                        self.handle_response(resp).await
                    }
                },
                TrainingSessionError::is_retryable,
            )
            .await
    }

    /// Convert non-2xx statuses to errors and decode the body as JSON.
    async fn handle_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<serde_json::Value, TrainingSessionError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TrainingSessionError::Status {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            TrainingSessionError::Decode(format!("{e} - body: {body_snippet}"))
        })
    }
}

/// Per-call message id: the correlation id plus a five digit random suffix.
fn message_id(correlation_id: &str) -> String {
    let suffix: u32 = rng().random_range(0..100_000);
    format!("{correlation_id}-{suffix:05}")
}

#[async_trait]
impl TrainingSessionClient for ReqwestTrainingSessionClient {
    async fn get_sessions(
        &self,
        date_from: NaiveDate,
        correlation_id: &str,
    ) -> Result<Vec<Session>, TrainingSessionError> {
        let url = self.endpoint(&["sessions"]);
        let query = [
            ("dateFrom", date_from.format("%Y%m%d").to_string()),
            ("sort", "date".to_string()),
            ("sortDir", "asc".to_string()),
        ];
        let body = self.get_json(url, &query, correlation_id).await?;
        let raw = body.get("sessions").cloned();
        let raw_len = raw.as_ref().and_then(|v| v.as_array()).map_or(0, Vec::len);
        let sessions = lenient_list::<Session>(raw).unwrap_or_default();
        if sessions.len() < raw_len {
            tracing::warn!(
                %correlation_id,
                dropped = raw_len - sessions.len(),
                "ignoring undecodable session records"
            );
        }
        Ok(sessions)
    }

    async fn get_session_exercises(
        &self,
        session: Session,
        correlation_id: &str,
    ) -> Result<SessionExercises, TrainingSessionError> {
        let Some(id) = session.id.clone() else {
            tracing::warn!(%correlation_id, date = ?session.date, "session without id; skipping exercise fetch");
            return Ok(SessionExercises {
                session,
                exercises: None,
            });
        };
        let url = self.endpoint(&["sessions", &id, "exercises"]);
        let body = self.get_json(url, &[], correlation_id).await?;
        Ok(SessionExercises {
            session,
            exercises: lenient_list(body.get("exercises").cloned()),
        })
    }
}
