//! Output records of the timeline builders.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domains::dates::yyyymmdd;

/// One muscle group touched on a training day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleEntry {
    pub muscle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Pain previously recorded for this muscle on the same day, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain: Option<f64>,
}

/// One day of the intensity timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(with = "yyyymmdd")]
    pub date: NaiveDate,
    pub rest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscles: Option<Vec<MuscleEntry>>,
}

impl TimelineEntry {
    pub fn rest_day(date: NaiveDate) -> Self {
        Self {
            date,
            rest: true,
            fatigue: None,
            pain: None,
            muscles: None,
        }
    }
}

/// One day of the duration timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationEntry {
    #[serde(with = "yyyymmdd")]
    pub date: NaiveDate,
    pub rest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_minutes: Option<f64>,
}

impl DurationEntry {
    pub fn rest_day(date: NaiveDate) -> Self {
        Self {
            date,
            rest: true,
            time_in_minutes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationsResponse {
    pub durations: Vec<DurationEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntensityResponse {
    pub days: Vec<TimelineEntry>,
}
