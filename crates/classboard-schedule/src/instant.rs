use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date_tag::DateTag;
use crate::time_of_day::TimeOfDay;
use crate::types::Weekday;

/// The "now" every classification is made against.
///
/// Local wall-clock time with no zone attached; server and clients are
/// assumed to share one timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceInstant(NaiveDateTime);

impl ReferenceInstant {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Minute-precision time of day; seconds are dropped.
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_naive(self.0.time())
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.time_of_day().minutes_since_midnight()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday().into()
    }

    pub fn date_tag(&self) -> DateTag {
        DateTag::from_date(self.date())
    }
}

impl From<NaiveDateTime> for ReferenceInstant {
    fn from(at: NaiveDateTime) -> Self {
        Self(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_calendar_views() {
        // 2024-06-12 was a Wednesday.
        let at = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(14, 45, 30)
            .unwrap();
        let instant = ReferenceInstant::new(at);
        assert_eq!(instant.weekday(), Weekday::Wednesday);
        assert_eq!(instant.date_tag().to_string(), "6/12");
        assert_eq!(instant.minutes_since_midnight(), 14 * 60 + 45);
    }
}
