//! Training statistics service.
//!
//! Turns sparse training-session records into gap-free daily timelines:
//! minutes trained per day, and per-day fatigue, pain and muscle groups.
//! The reconciliation itself lives in [`domains`] and is pure; the rest of
//! the crate fetches the records and serves the results over HTTP.

pub mod clock;
pub mod config;
pub mod domains;
pub mod error;
pub mod http;
pub mod middleware;
pub mod services;
pub mod types;

pub use clock::{Clock, FixedClock, ZonedClock};
pub use error::{StatsError, StatsResult};
pub use services::StatsService;
pub use types::{DurationEntry, MuscleEntry, TimelineEntry};
