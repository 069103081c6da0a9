use classboard_core::ScheduleId;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cancellation::{with_cancellation, without_cancellation};
use crate::classifier::{classify, effective_subject, is_canceled_on, progress_percent, ScheduleStatus};
use crate::date_tag::DateTag;
use crate::error::Result;
use crate::instant::ReferenceInstant;
use crate::ordering::{sort_for_display, sort_past};
use crate::store::{ScheduleStore, Snapshot};
use crate::types::{Curriculum, Grade, Schedule, Weekday};

/// One displayable slot for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledEntry {
    pub id: ScheduleId,
    pub teacher_name: Option<String>,
    pub subject: String,
    pub grade: Grade,
    pub curriculum: Curriculum,
    /// `h:mm AM/PM`
    pub start: String,
    pub end: String,
    pub status: ScheduleStatus,
    pub progress: u8,
    /// Canceled for today's date. Status is still reported as usual.
    pub canceled: bool,
}

/// Placeholder for a record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidEntry {
    pub id: ScheduleId,
    pub reason: String,
}

/// Everything the dashboard shows for one reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub at: ReferenceInstant,
    pub day: Weekday,
    pub date_tag: DateTag,
    /// Active then upcoming, active first and by start time.
    pub current: Vec<ScheduledEntry>,
    /// Finished today, latest start first.
    pub past: Vec<ScheduledEntry>,
    pub invalid: Vec<InvalidEntry>,
}

/// Build the view for `at` from one store snapshot.
///
/// Only today's weekday is shown. Each record is validated on its own; a
/// bad record becomes an [`InvalidEntry`] and never affects the others.
pub fn build_view(snapshot: &Snapshot, at: ReferenceInstant) -> DashboardView {
    let today = at.weekday();
    let tag = at.date_tag();
    let now = at.time_of_day();

    let mut current: Vec<(Schedule, ScheduledEntry)> = Vec::new();
    let mut past: Vec<(Schedule, ScheduledEntry)> = Vec::new();
    let mut invalid = Vec::new();

    for record in &snapshot.schedules {
        let schedule = match Schedule::try_from(record) {
            Ok(s) => s,
            Err(e) => {
                // Unknown-day records can't be filtered, so they are shown too.
                let other_day = matches!(record.day.parse::<Weekday>(), Ok(d) if d != today);
                if !other_day {
                    warn!(schedule_id = %record.id, error = %e, "invalid schedule record");
                    invalid.push(InvalidEntry {
                        id: record.id.clone(),
                        reason: e.to_string(),
                    });
                }
                continue;
            }
        };
        if schedule.day() != today {
            continue;
        }

        let progress = match progress_percent(&schedule, now) {
            Ok(p) => p,
            Err(e) => {
                warn!(schedule_id = %record.id, error = %e, "progress unavailable");
                invalid.push(InvalidEntry {
                    id: record.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let teacher = record.teacher.as_ref().or_else(|| snapshot.teacher_for(record));
        let status = classify(&schedule, now);
        let entry = ScheduledEntry {
            id: schedule.id().clone(),
            teacher_name: teacher.map(|t| t.name.clone()),
            subject: effective_subject(&schedule, teacher).to_string(),
            grade: schedule.grade(),
            curriculum: schedule.curriculum(),
            start: schedule.start_time().format_12h(),
            end: schedule.end_time().format_12h(),
            status,
            progress,
            canceled: is_canceled_on(&schedule, tag),
        };

        if status == ScheduleStatus::Past {
            past.push((schedule, entry));
        } else {
            current.push((schedule, entry));
        }
    }

    sort_for_display(&mut current, now, |(s, _)| s);
    sort_past(&mut past, |(s, _)| s);

    debug!(
        day = %today,
        current = current.len(),
        past = past.len(),
        invalid = invalid.len(),
        "dashboard view built"
    );

    DashboardView {
        at,
        day: today,
        date_tag: tag,
        current: current.into_iter().map(|(_, e)| e).collect(),
        past: past.into_iter().map(|(_, e)| e).collect(),
        invalid,
    }
}

/// Cancel one day of a recurring slot and persist the new canceled-date list.
///
/// The read and the write happen as one store update, so concurrent
/// cancellations of the same slot never drop each other's days. Canceling an
/// already-canceled day writes nothing and returns the schedule unchanged.
pub fn cancel_occurrence(store: &dyn ScheduleStore, id: &ScheduleId, tag: DateTag) -> Result<Schedule> {
    let (updated, written) = store.update_canceled_dates(id, &|s: &Schedule| with_cancellation(s, tag))?;
    if written {
        info!(schedule_id = %id, date = %tag, "occurrence canceled");
    } else {
        debug!(schedule_id = %id, date = %tag, "already canceled");
    }
    Ok(updated)
}

/// Undo a day's cancellation. No-op when the day was not canceled.
pub fn restore_occurrence(store: &dyn ScheduleStore, id: &ScheduleId, tag: DateTag) -> Result<Schedule> {
    let (updated, written) = store.update_canceled_dates(id, &|s: &Schedule| without_cancellation(s, tag))?;
    if written {
        info!(schedule_id = %id, date = %tag, "occurrence restored");
    }
    Ok(updated)
}
