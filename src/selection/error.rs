//! Error types for selection operations.

use thiserror::Error;

/// Errors that can occur while adding favorites, simulated selections, or
/// per-semester course selections.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Referenced course does not exist
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    /// Course is already in the target collection
    #[error("Already selected: {course_id}")]
    AlreadySelected { course_id: String },

    /// Adding the course would double-book a weekly section
    #[error("Time conflict introduced by course {course_id}")]
    TimeConflict { course_id: String },

    /// Neither the request nor the course carries a semester
    #[error("Semester is required and the course has none")]
    MissingSemester,

    /// Status is not one of the recognized selection statuses
    #[error("Unknown selection status: {status}")]
    InvalidStatus { status: String },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl SelectionError {
    /// Returns true if the error is the caller's fault (4xx-class).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SelectionError::Db(_))
    }
}
