use std::collections::HashMap;

use chrono::NaiveDate;
use training_session_client::{Exercise, MusclePain, SessionExercises};

use super::dates::parse_day;

/// Everything recorded on one calendar day, across all of its sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub fatigue_sum: f64,
    /// Sessions that reported a fatigue score.
    pub fatigue_count: u32,
    pub pain_sum: f64,
    /// Sessions that reported a pain score.
    pub pain_count: u32,
    pub session_count: u32,
    /// `None` until a session carrying an exercise list is merged in.
    pub exercises: Option<Vec<Exercise>>,
    pub existing_pain_levels: Vec<MusclePain>,
}

impl DayAggregate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            fatigue_sum: 0.0,
            fatigue_count: 0,
            pain_sum: 0.0,
            pain_count: 0,
            session_count: 0,
            exercises: None,
            existing_pain_levels: Vec::new(),
        }
    }

    fn absorb(&mut self, item: &SessionExercises) {
        let session = &item.session;
        self.session_count += 1;
        if let Some(f) = session.fatigue {
            self.fatigue_sum += f;
            self.fatigue_count += 1;
        }
        if let Some(p) = session.pain {
            self.pain_sum += p;
            self.pain_count += 1;
        }
        if let Some(exercises) = &item.exercises {
            self.exercises
                .get_or_insert_with(Vec::new)
                .extend(exercises.iter().cloned());
        }
        self.existing_pain_levels
            .extend(session.muscles.iter().cloned());
    }

    /// Average fatigue over the sessions that reported one; the raw sum
    /// (zero or the single value) otherwise.
    pub fn fatigue(&self) -> f64 {
        average(self.fatigue_sum, self.fatigue_count)
    }

    /// Average pain over the sessions that reported one; the raw sum
    /// (zero or the single value) otherwise.
    pub fn pain(&self) -> f64 {
        average(self.pain_sum, self.pain_count)
    }
}

fn average(sum: f64, count: u32) -> f64 {
    if count > 1 { sum / f64::from(count) } else { sum }
}

/// Fold sessions into one aggregate per distinct date.
///
/// Sessions without a usable `YYYYMMDD` date cannot be placed on the
/// timeline and are skipped.
pub fn merge_by_date(sessions: &[SessionExercises]) -> HashMap<NaiveDate, DayAggregate> {
    let mut days: HashMap<NaiveDate, DayAggregate> = HashMap::new();
    for item in sessions {
        let Some(date) = item.session.date.as_deref().and_then(parse_day) else {
            tracing::warn!(
                session_id = ?item.session.id,
                date = ?item.session.date,
                "skipping session without a valid date"
            );
            continue;
        };
        days.entry(date)
            .or_insert_with(|| DayAggregate::new(date))
            .absorb(item);
    }
    days
}
