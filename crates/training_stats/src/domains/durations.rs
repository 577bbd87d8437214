use std::collections::HashMap;

use chrono::NaiveDate;
use training_session_client::Session;

use super::dates::parse_day;
use crate::types::DurationEntry;

/// Minutes credited to a session that did not record its duration.
pub const DEFAULT_SESSION_MINUTES: f64 = 50.0;

/// Annotate every scaffold day with the total training minutes recorded on it.
pub fn aggregate_durations(days: &[NaiveDate], sessions: &[Session]) -> Vec<DurationEntry> {
    let mut minutes_by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for session in sessions {
        let Some(date) = session.date.as_deref().and_then(parse_day) else {
            tracing::warn!(session_id = ?session.id, date = ?session.date, "skipping session without a valid date");
            continue;
        };
        *minutes_by_day.entry(date).or_insert(0.0) +=
            session.time_in_minutes.unwrap_or(DEFAULT_SESSION_MINUTES);
    }

    days.iter()
        .map(|&date| match minutes_by_day.get(&date) {
            Some(&minutes) => DurationEntry {
                date,
                rest: false,
                time_in_minutes: Some(minutes),
            },
            None => DurationEntry::rest_day(date),
        })
        .collect()
}
