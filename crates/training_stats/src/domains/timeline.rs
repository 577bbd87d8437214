use chrono::NaiveDate;
use training_session_client::{Session, SessionExercises};

use super::dates::generate_dates;
use super::durations::aggregate_durations;
use super::merge::merge_by_date;
use super::rest_days::reconcile;
use crate::types::{DurationEntry, TimelineEntry};

/// Minutes trained on every day from `date_from` through `today`.
pub fn build_duration_timeline(
    date_from: NaiveDate,
    today: NaiveDate,
    sessions: &[Session],
) -> Vec<DurationEntry> {
    let days = generate_dates(date_from, today);
    aggregate_durations(&days, sessions)
}

/// Fatigue, pain and muscles for every day from `date_from` through `today`.
pub fn build_intensity_timeline(
    date_from: NaiveDate,
    today: NaiveDate,
    sessions: &[SessionExercises],
) -> Vec<TimelineEntry> {
    let merged = merge_by_date(sessions);
    reconcile(&merged, date_from, today)
}
