use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cancellation;
use crate::date_tag::DateTag;
use crate::error::{Result, ScheduleError};
use crate::time_of_day::TimeOfDay;
use crate::types::{Schedule, Teacher};

/// Where a slot stands relative to a reference time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// The slot ended before the reference minute.
    Past,
    /// The reference minute is within `[start, end]`, both ends included.
    Active,
    /// The slot starts after the reference minute.
    Upcoming,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduleStatus::Past => "past",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Upcoming => "upcoming",
        };
        write!(f, "{s}")
    }
}

/// Classify `schedule` at time of day `at`.
///
/// Weekday is not considered; callers filter to today's slots first. The
/// end minute itself counts as Active.
pub fn classify(schedule: &Schedule, at: TimeOfDay) -> ScheduleStatus {
    let now = at.minutes_since_midnight();
    if now > schedule.end_time().minutes_since_midnight() {
        ScheduleStatus::Past
    } else if now < schedule.start_time().minutes_since_midnight() {
        ScheduleStatus::Upcoming
    } else {
        ScheduleStatus::Active
    }
}

/// Percentage of the slot elapsed at `at`, rounded half up, in `0..=100`.
pub fn progress_percent(schedule: &Schedule, at: TimeOfDay) -> Result<u8> {
    progress_between(schedule.start_time(), schedule.end_time(), at)
}

fn progress_between(start: TimeOfDay, end: TimeOfDay, at: TimeOfDay) -> Result<u8> {
    let start = start.minutes_since_midnight();
    let end = end.minutes_since_midnight();
    let now = at.minutes_since_midnight();

    if end <= start {
        return Err(ScheduleError::DivideByZeroGuard);
    }
    if now <= start {
        return Ok(0);
    }
    if now >= end {
        return Ok(100);
    }

    let elapsed = now - start;
    let span = end - start;
    // round(100 * elapsed / span) without going through floats
    let pct = (200 * elapsed + span) / (2 * span);
    Ok(pct.min(100) as u8)
}

pub fn is_canceled_on(schedule: &Schedule, tag: DateTag) -> bool {
    cancellation::is_canceled(schedule, tag)
}

/// The subject to display: the slot's own subject, or the teacher's when the
/// slot leaves it blank.
pub fn effective_subject<'a>(schedule: &'a Schedule, teacher: Option<&'a Teacher>) -> &'a str {
    let own = schedule.subject().trim();
    if !own.is_empty() {
        return own;
    }
    teacher.map(|t| t.subject.as_str()).unwrap_or("")
}
