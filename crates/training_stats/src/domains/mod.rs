//! Timeline reconciliation: the pure core of the service.
//!
//! Nothing here performs I/O; every function takes already-fetched
//! records and returns freshly built values.
//!
//! # Modules
//!
//! - [`dates`]: `YYYYMMDD` parsing and calendar range generation
//! - [`merge`]: folding same-day sessions into a [`merge::DayAggregate`]
//! - [`muscles`]: distinct muscle groups per day with carried-over pain
//! - [`rest_days`]: laying aggregates onto the full range with rest days
//! - [`durations`]: minutes trained per day
//! - [`timeline`]: the two public timeline builders

pub mod dates;
pub mod durations;
pub mod merge;
pub mod muscles;
pub mod rest_days;
pub mod timeline;

pub use durations::DEFAULT_SESSION_MINUTES;
pub use timeline::{build_duration_timeline, build_intensity_timeline};
