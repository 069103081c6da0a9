use thiserror::Error;

/// Errors that can occur within the schedule engine and its store seam.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Time text does not look like `H:MM` or `HH:MM`.
    #[error("Invalid time format: {input:?} (expected H:MM or HH:MM)")]
    InvalidFormat { input: String },

    /// Hour or minute outside the wall-clock range.
    #[error("Time out of range: {hour}:{minute:02}")]
    OutOfRange { hour: u32, minute: u32 },

    /// Progress requested for a zero-length slot.
    #[error("Schedule has zero duration; progress is undefined")]
    DivideByZeroGuard,

    /// Start time is not strictly before end time.
    #[error("Invalid time range: start {start} is not before end {end}")]
    InvalidRange { start: String, end: String },

    /// Date tag is not a valid `M/d` calendar label.
    #[error("Invalid date tag: {input:?} (expected M/d)")]
    InvalidDateTag { input: String },

    #[error("Unknown weekday: {0}")]
    UnknownDay(String),

    #[error("Unknown grade: {0}")]
    UnknownGrade(String),

    #[error("Unknown curriculum: {0}")]
    UnknownCurriculum(String),

    /// No schedule with the given ID exists in the store.
    #[error("Schedule not found: {id}")]
    ScheduleNotFound { id: String },

    /// A schedule with this ID is already stored.
    #[error("Schedule already exists: {id}")]
    DuplicateSchedule { id: String },

    /// The store could not be read or written (e.g. a poisoned lock).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ScheduleError {
    /// True for errors caused by one malformed record.
    ///
    /// The dashboard renders such a record as a placeholder and keeps going.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidFormat { .. }
                | ScheduleError::OutOfRange { .. }
                | ScheduleError::InvalidRange { .. }
                | ScheduleError::InvalidDateTag { .. }
                | ScheduleError::UnknownDay(_)
                | ScheduleError::UnknownGrade(_)
                | ScheduleError::UnknownCurriculum(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_are_isolated_class() {
        assert!(ScheduleError::InvalidFormat { input: "x".into() }.is_record_error());
        assert!(ScheduleError::OutOfRange { hour: 25, minute: 0 }.is_record_error());
        assert!(ScheduleError::UnknownDay("Funday".into()).is_record_error());
        assert!(!ScheduleError::ScheduleNotFound { id: "a".into() }.is_record_error());
        assert!(!ScheduleError::StoreUnavailable("poisoned".into()).is_record_error());
    }

    #[test]
    fn out_of_range_message_pads_minute() {
        let err = ScheduleError::OutOfRange { hour: 7, minute: 5 };
        assert_eq!(err.to_string(), "Time out of range: 7:05");
    }
}
