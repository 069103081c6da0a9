use std::io::Write;
use std::path::{Path, PathBuf};

use classboard_core::ScheduleId;
use classboard_schedule::{
    DateTag, MemoryStore, Result, Schedule, ScheduleError, ScheduleStore, Snapshot,
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Store over a JSON snapshot file.
///
/// The file is re-read on every call, so the watch loop picks up edits made
/// by whatever produces it. Writes load the file, apply the change through a
/// [`MemoryStore`] and write the whole snapshot back.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<MemoryStore> {
        let raw = Snapshot::from_json_file(&self.path)
            .map_err(|e| ScheduleError::StoreUnavailable(e.to_string()))?;
        Ok(MemoryStore::new(raw))
    }

    fn save(&self, store: &MemoryStore) -> Result<()> {
        let mut snapshot = store.snapshot()?;
        // joined rows are derived; keep the file normalized
        for record in &mut snapshot.schedules {
            record.teacher = None;
        }
        let unavailable = |e: String| {
            ScheduleError::StoreUnavailable(format!("{}: {e}", self.path.display()))
        };
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| unavailable(e.to_string()))?;

        // write beside the target, then rename, so a concurrent poll never
        // sees a half-written file
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| unavailable(e.to_string()))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| unavailable(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| unavailable(e.error.to_string()))?;
        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&MemoryStore) -> Result<()>,
    {
        let store = self.load()?;
        apply(&store)?;
        self.save(&store)
    }
}

impl ScheduleStore for SnapshotFile {
    fn snapshot(&self) -> Result<Snapshot> {
        self.load()?.snapshot()
    }

    fn replace_canceled_dates(&self, id: &ScheduleId, dates: &[DateTag]) -> Result<()> {
        self.update(|store| store.replace_canceled_dates(id, dates))
    }

    fn update_canceled_dates(
        &self,
        id: &ScheduleId,
        update: &dyn Fn(&Schedule) -> Schedule,
    ) -> Result<(Schedule, bool)> {
        let store = self.load()?;
        let (updated, written) = store.update_canceled_dates(id, update)?;
        if written {
            self.save(&store)?;
        }
        Ok((updated, written))
    }

    fn replace(&self, schedule: &Schedule) -> Result<()> {
        self.update(|store| store.replace(schedule))
    }

    fn delete(&self, id: &ScheduleId) -> Result<()> {
        self.update(|store| store.delete(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classboard_schedule::dashboard::{cancel_occurrence, restore_occurrence};

    const SNAPSHOT: &str = r#"{
        "schedules": [{"id": "s-1", "teacher_id": "t-1", "day": "Monday",
            "start_time": "8:00", "end_time": "9:00", "grade": "3", "curriculum": "standard"}],
        "teachers": [{"id": "t-1", "name": "Dr. Chen", "subject": "Math"}]
    }"#;

    fn file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        file
    }

    #[test]
    fn snapshot_joins_teachers() {
        let file = file();
        let store = SnapshotFile::new(file.path());
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.schedules[0].teacher.as_ref().unwrap().name, "Dr. Chen");
    }

    #[test]
    fn cancel_is_written_back() {
        let file = file();
        let store = SnapshotFile::new(file.path());
        let tag = DateTag::parse("3/4").unwrap();
        cancel_occurrence(&store, &"s-1".into(), tag).unwrap();

        let reread = Snapshot::from_json_file(file.path()).unwrap();
        assert_eq!(reread.schedules[0].canceled_dates, vec!["3/4"]);
        assert!(reread.schedules[0].teacher.is_none());
        assert_eq!(reread.teachers.len(), 1);
    }

    #[test]
    fn save_replaces_file_whole() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let store = SnapshotFile::new(&path);
        let id: ScheduleId = "s-1".into();

        cancel_occurrence(&store, &id, DateTag::parse("3/4").unwrap()).unwrap();
        cancel_occurrence(&store, &id, DateTag::parse("3/11").unwrap()).unwrap();
        restore_occurrence(&store, &id, DateTag::parse("3/4").unwrap()).unwrap();

        let reread = Snapshot::from_json_file(&path).unwrap();
        assert_eq!(reread.schedules[0].canceled_dates, vec!["3/11"]);
        // no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_file_is_store_error() {
        let store = SnapshotFile::new("/nonexistent/snapshot.json");
        assert!(matches!(
            store.snapshot(),
            Err(ScheduleError::StoreUnavailable(_))
        ));
    }
}
