use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use classboard_core::{ClassboardError, ScheduleId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::date_tag::DateTag;
use crate::error::{Result, ScheduleError};
use crate::types::{Schedule, ScheduleRecord, Teacher};

/// Everything the dashboard reads in one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub schedules: Vec<ScheduleRecord>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> classboard_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> classboard_core::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ClassboardError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Teacher row referenced by `record`, if any.
    pub fn teacher_for(&self, record: &ScheduleRecord) -> Option<&Teacher> {
        let id = record.teacher_id.as_ref()?;
        self.teachers.iter().find(|t| &t.id == id)
    }
}

/// The record store the engine reads from and writes derived records back to.
///
/// Implementations own durability; the engine never mutates a record in
/// place, it hands back a whole new value for the store to keep.
pub trait ScheduleStore: Send + Sync {
    /// Current schedules, each with its teacher row joined, plus all teachers.
    fn snapshot(&self) -> Result<Snapshot>;

    /// Overwrite one schedule's canceled-date list.
    fn replace_canceled_dates(&self, id: &ScheduleId, dates: &[DateTag]) -> Result<()>;

    /// Overwrite every field of an existing schedule (an edit).
    fn replace(&self, schedule: &Schedule) -> Result<()>;

    fn delete(&self, id: &ScheduleId) -> Result<()>;

    /// Single record by id, teacher joined.
    fn record(&self, id: &ScheduleId) -> Result<ScheduleRecord> {
        self.snapshot()?
            .schedules
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| ScheduleError::ScheduleNotFound { id: id.to_string() })
    }

    /// Derive a new canceled-date list from the stored schedule and write it
    /// back. Returns the updated schedule and whether anything was written.
    ///
    /// The default reads and writes in two steps. Stores shared between
    /// threads override it to do both under one lock.
    fn update_canceled_dates(
        &self,
        id: &ScheduleId,
        update: &dyn Fn(&Schedule) -> Schedule,
    ) -> Result<(Schedule, bool)> {
        let current = Schedule::try_from(&self.record(id)?)?;
        let updated = update(&current);
        if updated.canceled_dates() == current.canceled_dates() {
            return Ok((updated, false));
        }
        self.replace_canceled_dates(id, updated.canceled_dates())?;
        Ok((updated, true))
    }
}

/// In-process store, shared by cloning.
///
/// Holds records in their raw form so a malformed row survives untouched
/// and shows up as a placeholder rather than vanishing.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Snapshot>>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>> {
        self.inner
            .lock()
            .map_err(|e| ScheduleError::StoreUnavailable(e.to_string()))
    }

    /// Add a new schedule. Its id must not already be present.
    pub fn insert(&self, schedule: &Schedule) -> Result<()> {
        let mut data = self.lock()?;
        if data.schedules.iter().any(|r| &r.id == schedule.id()) {
            return Err(ScheduleError::DuplicateSchedule {
                id: schedule.id().to_string(),
            });
        }
        data.schedules.push(schedule.to_record());
        info!(schedule_id = %schedule.id(), day = %schedule.day(), "schedule added");
        Ok(())
    }

    /// Add or update a teacher row by id.
    pub fn upsert_teacher(&self, teacher: Teacher) -> Result<()> {
        let mut data = self.lock()?;
        match data.teachers.iter_mut().find(|t| t.id == teacher.id) {
            Some(existing) => *existing = teacher,
            None => data.teachers.push(teacher),
        }
        Ok(())
    }

    fn with_record<F, R>(&self, id: &ScheduleId, update: F) -> Result<R>
    where
        F: FnOnce(&mut ScheduleRecord) -> Result<R>,
    {
        let mut data = self.lock()?;
        let record = data
            .schedules
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ScheduleError::ScheduleNotFound { id: id.to_string() })?;
        update(record)
    }
}

impl ScheduleStore for MemoryStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let data = self.lock()?;
        let schedules = data
            .schedules
            .iter()
            .map(|r| ScheduleRecord {
                teacher: data.teacher_for(r).cloned(),
                ..r.clone()
            })
            .collect();
        debug!(count = data.schedules.len(), "snapshot taken");
        Ok(Snapshot {
            schedules,
            teachers: data.teachers.clone(),
        })
    }

    fn replace_canceled_dates(&self, id: &ScheduleId, dates: &[DateTag]) -> Result<()> {
        self.with_record(id, |r| {
            r.canceled_dates = dates.iter().map(|t| t.to_string()).collect();
            Ok(())
        })?;
        info!(schedule_id = %id, count = dates.len(), "canceled dates replaced");
        Ok(())
    }

    fn update_canceled_dates(
        &self,
        id: &ScheduleId,
        update: &dyn Fn(&Schedule) -> Schedule,
    ) -> Result<(Schedule, bool)> {
        let (updated, written) = self.with_record(id, |r| {
            let current = Schedule::try_from(&*r)?;
            let updated = update(&current);
            if updated.canceled_dates() == current.canceled_dates() {
                return Ok((updated, false));
            }
            r.canceled_dates = updated.canceled_dates().iter().map(|t| t.to_string()).collect();
            Ok((updated, true))
        })?;
        if written {
            info!(
                schedule_id = %id,
                count = updated.canceled_dates().len(),
                "canceled dates updated"
            );
        }
        Ok((updated, written))
    }

    fn replace(&self, schedule: &Schedule) -> Result<()> {
        self.with_record(schedule.id(), |r| {
            *r = schedule.to_record();
            Ok(())
        })?;
        info!(schedule_id = %schedule.id(), "schedule replaced");
        Ok(())
    }

    fn delete(&self, id: &ScheduleId) -> Result<()> {
        let mut data = self.lock()?;
        let before = data.schedules.len();
        data.schedules.retain(|r| &r.id != id);
        if data.schedules.len() == before {
            return Err(ScheduleError::ScheduleNotFound { id: id.to_string() });
        }
        info!(schedule_id = %id, "schedule deleted");
        Ok(())
    }
}
