//! `classboard-schedule`: temporal-state engine for a recurring class
//! timetable.
//!
//! # Overview
//!
//! A [`Schedule`] is a recurring weekly slot. Given a reference time of day
//! the engine classifies it, reports how far through it the class is,
//! orders a set of slots for display, and resolves per-date cancellations.
//! All of that is pure and synchronous. The [`store`] module is the seam to
//! whatever keeps the records; [`dashboard`] and [`poller`] glue the two
//! together for a live board.
//!
//! # Temporal states
//!
//! | State      | Holds when                          |
//! |------------|-------------------------------------|
//! | `Upcoming` | now < start                         |
//! | `Active`   | start <= now <= end (ends included) |
//! | `Past`     | now > end                           |

pub mod cancellation;
pub mod classifier;
pub mod dashboard;
pub mod date_tag;
pub mod error;
pub mod grouping;
pub mod instant;
pub mod ordering;
pub mod poller;
pub mod store;
pub mod time_of_day;
pub mod types;

pub use classifier::ScheduleStatus;
pub use dashboard::{build_view, DashboardView};
pub use date_tag::DateTag;
pub use error::{Result, ScheduleError};
pub use instant::ReferenceInstant;
pub use poller::DashboardPoller;
pub use store::{MemoryStore, ScheduleStore, Snapshot};
pub use time_of_day::TimeOfDay;
pub use types::{Curriculum, Grade, GroupedTeacher, Schedule, ScheduleRecord, Teacher, Weekday};
