use std::collections::HashSet;

use super::merge::DayAggregate;
use crate::types::MuscleEntry;

/// Distinct muscle groups touched on a day, in order of first appearance.
///
/// Exercises without a muscle group are ignored. Each muscle carries the
/// first pain level recorded for it in `existing_pain_levels`. Returns
/// `None` when the day has no exercise list at all.
pub fn extract_muscles(day: &DayAggregate) -> Option<Vec<MuscleEntry>> {
    let exercises = day.exercises.as_ref()?;
    let mut seen: HashSet<&str> = HashSet::new();
    let entries = exercises
        .iter()
        .filter_map(|e| {
            let muscle = e.muscle_group_id.as_deref()?;
            if !seen.insert(muscle) {
                return None;
            }
            Some(MuscleEntry {
                muscle: muscle.to_string(),
                session_id: e.session_id.clone(),
                pain: recorded_pain(day, muscle),
            })
        })
        .collect();
    Some(entries)
}

/// First match wins, so overlapping histories resolve in session order.
fn recorded_pain(day: &DayAggregate, muscle: &str) -> Option<f64> {
    day.existing_pain_levels
        .iter()
        .find(|p| p.muscle.as_deref() == Some(muscle))
        .and_then(|p| p.pain_level)
}
