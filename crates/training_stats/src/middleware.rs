//! Cross-cutting concerns around the upstream client: logging and metrics.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use training_session_client::{
    Session, SessionExercises, TrainingSessionClient, TrainingSessionError,
};
use tracing::debug;

pub const REQUESTS_TOTAL: &str = "training_session_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "training_session_request_duration_seconds";

/// Wraps a [`TrainingSessionClient`] and records every call.
#[derive(Clone)]
pub struct LoggingMiddleware<C: TrainingSessionClient> {
    inner: Arc<C>,
}

impl<C: TrainingSessionClient> LoggingMiddleware<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    async fn with_logging<F, Fut, T>(
        &self,
        operation: F,
        name: &'static str,
        correlation_id: &str,
    ) -> Result<T, TrainingSessionError>
    where
        F: FnOnce(Arc<C>) -> Fut,
        Fut: std::future::Future<Output = Result<T, TrainingSessionError>>,
    {
        let start = Instant::now();
        debug!(%correlation_id, "Starting operation: {}", name);

        let result = operation(self.inner.clone()).await;

        let elapsed = start.elapsed();
        let outcome = match &result {
            Ok(_) => {
                debug!(%correlation_id, "Operation completed: {} in {:?}", name, elapsed);
                "ok"
            }
            Err(e) => {
                debug!(%correlation_id, "Operation failed: {} in {:?} - error: {}", name, elapsed, e);
                "error"
            }
        };
        metrics::counter!(REQUESTS_TOTAL, "operation" => name, "outcome" => outcome).increment(1);
        metrics::histogram!(REQUEST_DURATION_SECONDS, "operation" => name)
            .record(elapsed.as_secs_f64());

        result
    }
}

#[async_trait::async_trait]
impl<C: TrainingSessionClient> TrainingSessionClient for LoggingMiddleware<C> {
    async fn get_sessions(
        &self,
        date_from: NaiveDate,
        correlation_id: &str,
    ) -> Result<Vec<Session>, TrainingSessionError> {
        self.with_logging(
            |client| async move { client.get_sessions(date_from, correlation_id).await },
            "get_sessions",
            correlation_id,
        )
        .await
    }

    async fn get_session_exercises(
        &self,
        session: Session,
        correlation_id: &str,
    ) -> Result<SessionExercises, TrainingSessionError> {
        self.with_logging(
            |client| async move { client.get_session_exercises(session, correlation_id).await },
            "get_session_exercises",
            correlation_id,
        )
        .await
    }
}
