use std::collections::HashMap;

use chrono::NaiveDate;

use super::dates::generate_dates;
use super::merge::DayAggregate;
use super::muscles::extract_muscles;
use crate::types::TimelineEntry;

/// Lay the merged days onto the full `[start, end]` range.
///
/// Order comes from the generated range, one entry per day. Dates without an
/// aggregate become rest days; aggregates outside the range are dropped.
pub fn reconcile(
    merged: &HashMap<NaiveDate, DayAggregate>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TimelineEntry> {
    generate_dates(start, end)
        .into_iter()
        .map(|date| match merged.get(&date) {
            Some(day) => training_day(day),
            None => TimelineEntry::rest_day(date),
        })
        .collect()
}

fn training_day(day: &DayAggregate) -> TimelineEntry {
    TimelineEntry {
        date: day.date,
        rest: false,
        fatigue: Some(day.fatigue()),
        pain: Some(day.pain()),
        muscles: extract_muscles(day),
    }
}
