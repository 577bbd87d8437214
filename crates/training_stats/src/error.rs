//! Error types for the stats service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    /// A required query parameter was not supplied.
    #[error("\"{0}\" is missing as a query parameter.")]
    MissingInput(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] training_session_client::TrainingSessionError),
}

impl StatsError {
    pub fn status(&self) -> StatusCode {
        match self {
            StatsError::MissingInput(_) | StatsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            StatsError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for service operations.
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_message_names_the_parameter() {
        let err = StatsError::MissingInput("dateFrom");
        assert_eq!(err.to_string(), "\"dateFrom\" is missing as a query parameter.");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err: StatsError = training_session_client::TrainingSessionError::Status {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
