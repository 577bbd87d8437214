//! `TrainingSessionClient` trait and the records served by the training session
//! microservice.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod retry;

#[derive(Debug, Error)]
pub enum TrainingSessionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decoding error: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl TrainingSessionError {
    /// Transport failures, throttling and server-side errors are worth retrying;
    /// client errors and malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrainingSessionError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            TrainingSessionError::Status { status, .. } => *status == 429 || *status >= 500,
            TrainingSessionError::Decode(_) | TrainingSessionError::Config(_) => false,
        }
    }
}

/// Pain previously recorded for a muscle group, attached to a session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MusclePain {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub muscle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub pain_level: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    /// Calendar day in `YYYYMMDD` form.
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub fatigue: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub pain: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_vec")]
    pub muscles: Vec<MusclePain>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub time_in_minutes: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub muscle_group_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub session_id: Option<String>,
}

/// A session together with the exercises fetched for it.
///
/// `exercises` is `None` when the upstream response carried no exercise list at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionExercises {
    pub session: Session,
    pub exercises: Option<Vec<Exercise>>,
}

/// Accepts strings and numbers; everything else is treated as absent.
fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts numbers and numeric strings; everything else is treated as absent.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Keeps the elements that decode and drops the ones that don't.
fn deserialize_lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(lenient_list(value).unwrap_or_default())
}

/// Decodes an optional list field, dropping malformed elements but keeping
/// the distinction between "absent" and "empty".
pub(crate) fn lenient_list<T: serde::de::DeserializeOwned>(
    value: Option<serde_json::Value>,
) -> Option<Vec<T>> {
    match value {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    }
}

#[async_trait]
pub trait TrainingSessionClient: Send + Sync + 'static {
    /// Sessions from `date_from` (inclusive) through today, ascending by date.
    async fn get_sessions(
        &self,
        date_from: NaiveDate,
        correlation_id: &str,
    ) -> Result<Vec<Session>, TrainingSessionError>;

    /// Exercises recorded for a single session.
    async fn get_session_exercises(
        &self,
        session: Session,
        correlation_id: &str,
    ) -> Result<SessionExercises, TrainingSessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_accepts_numeric_date_and_id() {
        let payload = json!({"id": 17, "date": 20240102, "fatigue": 4, "timeInMinutes": 30});
        let s: Session = serde_json::from_value(payload).expect("deserialize session");
        assert_eq!(s.id.as_deref(), Some("17"));
        assert_eq!(s.date.as_deref(), Some("20240102"));
        assert_eq!(s.fatigue, Some(4.0));
        assert_eq!(s.time_in_minutes, Some(30.0));
        assert!(s.muscles.is_empty());
    }

    #[test]
    fn session_tolerates_malformed_fields() {
        let payload = json!({
            "id": "a",
            "date": {"nested": true},
            "fatigue": "not a number",
            "pain": "3",
            "muscles": [{"muscle": "chest", "painLevel": 2}, "garbage"]
        });
        let s: Session = serde_json::from_value(payload).expect("deserialize session");
        assert_eq!(s.date, None);
        assert_eq!(s.fatigue, None);
        assert_eq!(s.pain, Some(3.0));
        assert_eq!(s.muscles.len(), 1);
        assert_eq!(s.muscles[0].muscle.as_deref(), Some("chest"));
        assert_eq!(s.muscles[0].pain_level, Some(2.0));
    }

    #[test]
    fn non_list_muscles_decode_as_empty() {
        for muscles in [json!("chest"), json!({"muscle": "chest"}), json!(null)] {
            let s: Session =
                serde_json::from_value(json!({"id": "a", "muscles": muscles})).expect("session");
            assert!(s.muscles.is_empty());
        }
    }

    #[test]
    fn exercise_fields_are_optional() {
        let e: Exercise = serde_json::from_value(json!({"sessionId": 9})).expect("exercise");
        assert_eq!(e.muscle_group_id, None);
        assert_eq!(e.session_id.as_deref(), Some("9"));
    }

    #[test]
    fn lenient_list_distinguishes_absent_from_empty() {
        assert_eq!(lenient_list::<Exercise>(None), None);
        assert_eq!(lenient_list::<Exercise>(Some(json!(null))), None);
        assert_eq!(lenient_list::<Exercise>(Some(json!([]))), Some(vec![]));
    }

    #[test]
    fn retryable_statuses() {
        let err = |status| TrainingSessionError::Status {
            status,
            body: String::new(),
        };
        assert!(err(503).is_retryable());
        assert!(err(429).is_retryable());
        assert!(!err(404).is_retryable());
        assert!(!TrainingSessionError::Decode("x".into()).is_retryable());
    }
}
