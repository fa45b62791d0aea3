/// Helpers shared by the API endpoints

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::db::{DbCourse, SelectionDbManager};
use crate::selection::SelectionError;
use crate::server::types::ApiErrorType;
use crate::timetable::format_times;

/// Renders a course with its stored times and a display string.
pub fn course_payload(db: &SelectionDbManager, course: &DbCourse) -> rusqlite::Result<Value> {
    let times = db.times_for_course(&course.course_id)?;
    let display = format_times(
        &times
            .iter()
            .map(|t| (t.clone(), t.classroom.clone()))
            .collect::<Vec<_>>(),
    );
    Ok(json!({
        "id": course.course_id,
        "name_zh": course.name_zh,
        "name_en": course.name_en,
        "semester": course.semester,
        "grade": course.grade,
        "department_id": course.department_id,
        "teacher_name": course.teacher_name,
        "credit": course.credit,
        "required_type": course.required_type,
        "category": course.category,
        "limit_max": course.limit_max,
        "times": times,
        "times_display": display,
    }))
}

/// Maps a selection error to its API response.
pub fn selection_error_to_response(error: SelectionError) -> Response {
    let (status, message) = match &error {
        SelectionError::CourseNotFound { .. } => (StatusCode::NOT_FOUND, "Course not found"),
        SelectionError::AlreadySelected { .. } => (StatusCode::BAD_REQUEST, "Already selected"),
        SelectionError::TimeConflict { .. } => (StatusCode::BAD_REQUEST, "Time conflict"),
        SelectionError::MissingSemester => (StatusCode::BAD_REQUEST, "Semester is required"),
        SelectionError::InvalidStatus { .. } => (StatusCode::BAD_REQUEST, "Unknown status"),
        SelectionError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
    };
    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

/// Shorthand for a 500 wrapping a database error.
pub fn db_error_response(context: &str, e: rusqlite::Error) -> Response {
    ApiErrorType::from((
        StatusCode::INTERNAL_SERVER_ERROR,
        context,
        Some(e.to_string()),
    ))
    .into_response()
}
