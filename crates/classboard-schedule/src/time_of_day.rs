use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("static pattern"));

/// A validated wall-clock time with minute precision.
///
/// Ordering follows `minutes_since_midnight`. Serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Parse `H:MM` or `HH:MM`. Out-of-range parts are rejected, never clamped.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = TIME_PATTERN
            .captures(text)
            .ok_or_else(|| ScheduleError::InvalidFormat {
                input: text.to_string(),
            })?;
        // The pattern guarantees at most two ASCII digits per group.
        let hour: u32 = caps[1].parse().map_err(|_| ScheduleError::InvalidFormat {
            input: text.to_string(),
        })?;
        let minute: u32 = caps[2].parse().map_err(|_| ScheduleError::InvalidFormat {
            input: text.to_string(),
        })?;
        Self::from_hm(hour, minute)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::OutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Truncates seconds; a chrono time is always in range.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Render as `h:mm AM/PM`, e.g. `9:05 AM`, `12:00 PM` for noon, `12:00 AM` for midnight.
    pub fn format_12h(&self) -> String {
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}
