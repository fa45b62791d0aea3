//! Simulated-selection endpoints.
//!
//! The simulated schedule is a sandbox: adds are conflict-checked against
//! the other simulated courses, so students can see exactly which course
//! a prospective pick would clash with before real selection opens.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::db::DbUser;
use crate::selection;
use crate::server::types::ApiErrorType;
use crate::server::util::{course_payload, db_error_response, selection_error_to_response};
use crate::types::AppState;

/// POST /simulate/:course_id
///
/// Adds a course to the simulated schedule, rejecting on time conflict.
pub async fn post_add_simulated(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("POST /simulate/{} (user={})", course_id, user.user_id);

    match selection::add_simulated(&s.db, &s.selection_locks, &user.user_id, &course_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Added to simulated selection" })),
        )
            .into_response(),
        Err(e) => selection_error_to_response(e),
    }
}

/// GET /simulate
pub async fn get_simulated(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("GET /simulate (user={})", user.user_id);

    let courses = match s.db.simulated_courses(&user.user_id) {
        Ok(c) => c,
        Err(e) => return db_error_response("Failed to list simulated selection", e),
    };

    let mut items = Vec::with_capacity(courses.len());
    for course in &courses {
        match course_payload(&s.db, course) {
            Ok(v) => items.push(v),
            Err(e) => return db_error_response("Failed to fetch course times", e),
        }
    }

    (StatusCode::OK, Json(items)).into_response()
}

/// DELETE /simulate/:course_id
pub async fn delete_simulated(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("DELETE /simulate/{} (user={})", course_id, user.user_id);

    match s.db.remove_simulated(&user.user_id, &course_id) {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "Removed from simulated selection" })),
        )
            .into_response(),
        Ok(false) => {
            ApiErrorType::from((StatusCode::NOT_FOUND, "Not found", None)).into_response()
        }
        Err(e) => db_error_response("Failed to remove simulated selection", e),
    }
}
