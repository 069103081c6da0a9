//! `classboard-core`: configuration, error and identifier types shared by
//! every classboard crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::ClassboardConfig;
pub use error::{ClassboardError, Result};
pub use types::{ScheduleId, TeacherId};
