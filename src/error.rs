//! Error types.
//!
//! Only precondition and configuration failures are errors. A timetable
//! that still has conflicts after the generation budget is a valid (low
//! fitness) result, not an error.

use thiserror::Error;

/// Errors returned by the timetable engine.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The request contains no classes.
    #[error("no classes supplied")]
    NoClasses,

    /// The request contains no teachers.
    #[error("no teachers supplied")]
    NoTeachers,

    /// The request contains no rooms.
    #[error("no rooms supplied")]
    NoRooms,

    /// The request contains no courses.
    #[error("no courses supplied")]
    NoCourses,

    /// Working days or periods per day are unusable.
    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),

    /// GA parameters failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`EngineConfig`](crate::config::EngineConfig).
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
