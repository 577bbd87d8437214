use std::sync::Arc;

use chrono::{Days, NaiveDate};
use futures_util::{StreamExt, TryStreamExt, stream};
use training_session_client::TrainingSessionClient;

use crate::clock::Clock;
use crate::domains::{build_duration_timeline, build_intensity_timeline};
use crate::error::{StatsError, StatsResult};
use crate::types::{DurationEntry, TimelineEntry};

/// Fetches upstream data and hands it to the timeline builders once all of
/// it has arrived.
#[derive(Clone)]
pub struct StatsService {
    client: Arc<dyn TrainingSessionClient>,
    clock: Arc<dyn Clock>,
    fetch_concurrency: usize,
}

impl StatsService {
    pub fn new(
        client: Arc<dyn TrainingSessionClient>,
        clock: Arc<dyn Clock>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            client,
            clock,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub async fn durations(
        &self,
        date_from: NaiveDate,
        correlation_id: &str,
    ) -> StatsResult<Vec<DurationEntry>> {
        let today = self.today();
        let sessions = self.client.get_sessions(date_from, correlation_id).await?;
        tracing::info!(
            %correlation_id,
            %date_from,
            %today,
            sessions = sessions.len(),
            "building duration timeline"
        );
        Ok(build_duration_timeline(date_from, today, &sessions))
    }

    /// Intensity over the `days` days before today plus today itself.
    pub async fn intensity(
        &self,
        days: u32,
        correlation_id: &str,
    ) -> StatsResult<Vec<TimelineEntry>> {
        let today = self.today();
        let date_from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| StatsError::InvalidInput(format!("window of {days} days is out of range")))?;

        let sessions = self.client.get_sessions(date_from, correlation_id).await?;
        let with_exercises: Vec<_> = stream::iter(sessions)
            .map(|session| self.client.get_session_exercises(session, correlation_id))
            .buffered(self.fetch_concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        tracing::info!(
            %correlation_id,
            %date_from,
            %today,
            sessions = with_exercises.len(),
            "building intensity timeline"
        );
        Ok(build_intensity_timeline(date_from, today, &with_exercises))
    }
}
