use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Source of "today" as a civil date.
pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

/// Today's date in a fixed IANA timezone.
#[derive(Clone, Copy, Debug)]
pub struct ZonedClock(pub Tz);

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

/// Always reports the same day.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
