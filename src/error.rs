//! Error types for plan editing.
//!
//! The placement engines never fail; an exam without a legal slot is left
//! unassigned. Errors only arise when the host addresses an exam, week or
//! class that does not exist, or hands over an unreadable document.

use thiserror::Error;

/// Main error type for plan operations
#[derive(Debug, Error)]
pub enum PlannerError {
    /// No exam with this id in the plan
    #[error("Unknown exam: {0}")]
    UnknownExam(String),

    /// No week with this id in the calendar
    #[error("Unknown week: {0}")]
    UnknownWeek(String),

    /// No timetable for this class
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Plan document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlannerError>;
