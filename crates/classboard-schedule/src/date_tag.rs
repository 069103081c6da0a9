use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})$").expect("static pattern"));

/// A yearless calendar label, written `M/d` (e.g. `6/12`).
///
/// Leading zeros are accepted on input and dropped on output, so `06/12`
/// and `6/12` name the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateTag {
    month: u32,
    day: u32,
}

impl DateTag {
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidDateTag {
            input: text.to_string(),
        };
        let caps = TAG_PATTERN.captures(text).ok_or_else(invalid)?;
        let month: u32 = caps[1].parse().map_err(|_| invalid())?;
        let day: u32 = caps[2].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) || day == 0 || day > max_day(month) {
            return Err(invalid());
        }
        Ok(Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

// Tags carry no year, so February always allows the 29th.
fn max_day(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for DateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

impl FromStr for DateTag {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateTag {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DateTag> for String {
    fn from(tag: DateTag) -> Self {
        tag.to_string()
    }
}
