//! Per-semester selection and timetable endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::db::DbUser;
use crate::selection;
use crate::server::util::{course_payload, db_error_response, selection_error_to_response};
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct AddSelectionBody {
    pub course_id: String,
    /// Defaults to the course's own semester.
    pub semester: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "planned".to_string()
}

/// POST /selections
///
/// Adds one course to the semester's planned selections, conflict-checked
/// against everything already planned or completed for that semester.
pub async fn post_add_selection(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
    Json(body): Json<AddSelectionBody>,
) -> Response {
    info!(
        "POST /selections course={} (user={})",
        body.course_id, user.user_id
    );

    match selection::add_selection(
        &s.db,
        &s.selection_locks,
        &user.user_id,
        &body.course_id,
        body.semester.as_deref(),
        &body.status,
    )
    .await
    {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "detail": "Inserted",
                "course_id": receipt.course_id,
                "semester": receipt.semester,
                "status": receipt.status,
            })),
        )
            .into_response(),
        Err(e) => selection_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBatchBody {
    pub semester: String,
    /// Processed in order; a conflict aborts the batch and names the
    /// course that introduced it.
    pub course_ids: Vec<String>,
}

/// POST /selections/batch
pub async fn post_add_selections_batch(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
    Json(body): Json<AddBatchBody>,
) -> Response {
    info!(
        "POST /selections/batch {} courses (user={})",
        body.course_ids.len(),
        user.user_id
    );

    match selection::add_selections_batch(
        &s.db,
        &s.selection_locks,
        &user.user_id,
        &body.course_ids,
        &body.semester,
    )
    .await
    {
        Ok(receipts) => {
            let inserted: Vec<_> = receipts.iter().map(|r| &r.course_id).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "detail": "Inserted",
                    "semester": body.semester,
                    "course_ids": inserted,
                })),
            )
                .into_response()
        }
        Err(e) => selection_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TimetableParams {
    pub semester: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// GET /timetable?semester=1141
///
/// The user's selected courses for the semester, each with its times
/// sorted by (weekday, start_section) and a display string.
pub async fn get_timetable(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
    Query(params): Query<TimetableParams>,
) -> Response {
    info!(
        "GET /timetable semester={} (user={})",
        params.semester, user.user_id
    );

    let courses = match s
        .db
        .selected_courses(&user.user_id, &params.semester, &params.status)
    {
        Ok(c) => c,
        Err(e) => return db_error_response("Failed to fetch timetable", e),
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
