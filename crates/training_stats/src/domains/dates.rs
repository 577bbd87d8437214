use chrono::NaiveDate;

/// Wire format of calendar days, e.g. `20240131`.
pub const DAY_FORMAT: &str = "%Y%m%d";

/// Parse a `YYYYMMDD` day. Surrounding whitespace is ignored.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, DAY_FORMAT).ok()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Every calendar day from `start` through `end`, both inclusive.
///
/// An inverted range yields no days.
pub fn generate_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Serde adapter rendering a `NaiveDate` as `YYYYMMDD`.
pub mod yyyymmdd {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format(super::DAY_FORMAT))
    }
}
