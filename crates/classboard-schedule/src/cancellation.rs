//! Per-date cancellation of recurring slots.
//!
//! A [`Schedule`] is the recurring template; its canceled-date list is a
//! sparse override keyed by [`DateTag`]. An [`Occurrence`] is the template
//! realized on one concrete date with that override applied.
//!
//! Tags never expire. A tag only ever matches the same month/day, so old
//! ones go inert instead of being pruned.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date_tag::DateTag;
use crate::types::{Schedule, Weekday};

/// True when `schedule` has been canceled for the day named by `tag`.
pub fn is_canceled(schedule: &Schedule, tag: DateTag) -> bool {
    schedule.canceled_dates().contains(&tag)
}

/// Return a copy of `schedule` canceled for `tag`.
///
/// Idempotent: canceling a day that is already canceled returns an equal
/// schedule, so repeated clicks never grow the list.
pub fn with_cancellation(schedule: &Schedule, tag: DateTag) -> Schedule {
    if is_canceled(schedule, tag) {
        return schedule.clone();
    }
    let mut dates = schedule.canceled_dates().to_vec();
    dates.push(tag);
    schedule.clone().with_canceled_dates(dates)
}

/// Return a copy of `schedule` with the cancellation for `tag` lifted.
/// A day that was never canceled is left alone.
pub fn without_cancellation(schedule: &Schedule, tag: DateTag) -> Schedule {
    let dates: Vec<DateTag> = schedule
        .canceled_dates()
        .iter()
        .copied()
        .filter(|t| *t != tag)
        .collect();
    schedule.clone().with_canceled_dates(dates)
}

/// One concrete date's realization of a recurring slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence<'a> {
    pub schedule: &'a Schedule,
    pub date: NaiveDate,
    pub tag: DateTag,
    pub canceled: bool,
}

/// The occurrence of `schedule` on `date`, or `None` when the slot does not
/// meet on that weekday.
pub fn occurrence_on(schedule: &Schedule, date: NaiveDate) -> Option<Occurrence<'_>> {
    if Weekday::from(date.weekday()) != schedule.day() {
        return None;
    }
    let tag = DateTag::from_date(date);
    Some(Occurrence {
        schedule,
        date,
        tag,
        canceled: is_canceled(schedule, tag),
    })
}
