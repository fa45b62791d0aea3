//! Admin endpoints: user provisioning, course creation, time-grid
//! replacement, bulk import, and transcript records.
//!
//! Incoming weekly times are grid tokens. Every write path funnels them
//! through parse + compress, so the stored `course_times` rows are always
//! the minimal contiguous ranges regardless of what the client sent.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::DbCourse;
use crate::server::types::ApiErrorType;
use crate::server::util::db_error_response;
use crate::timetable::{compress, parse_slots, SectionRange};
use crate::types::AppState;

/// Course fields plus raw grid tokens, as submitted by the admin UI or a
/// spreadsheet-derived import row.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCourseIn {
    pub course_id: String,
    pub name_zh: String,
    pub name_en: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<i32>,
    pub department_id: Option<String>,
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub credit: i32,
    pub required_type: Option<String>,
    pub category: Option<String>,
    pub limit_max: Option<i32>,
    /// Grid tokens like "1-3"; malformed ones contribute nothing.
    #[serde(default)]
    pub time_slots: Vec<String>,
    pub classroom: Option<String>,
}

impl AdminCourseIn {
    fn ranges(&self) -> Vec<SectionRange> {
        compress(&parse_slots(&self.time_slots))
    }

    fn course(&self) -> DbCourse {
        DbCourse {
            course_id: self.course_id.clone(),
            name_zh: self.name_zh.clone(),
            name_en: self.name_en.clone(),
            semester: self.semester.clone(),
            grade: self.grade,
            department_id: self.department_id.clone(),
            teacher_name: self.teacher_name.clone(),
            credit: self.credit,
            required_type: self.required_type.clone(),
            category: self.category.clone(),
            limit_max: self.limit_max,
        }
    }
}

/// POST /admin/courses
pub async fn post_create_course(
    State(s): State<Arc<AppState>>,
    Json(body): Json<AdminCourseIn>,
) -> Response {
    info!("POST /admin/courses {}", body.course_id);

    let ranges = body.ranges();
    match s
        .db
        .insert_course_with_times(&body.course(), &ranges, body.classroom.as_deref())
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "Course saved",
                "course_id": body.course_id,
                "time_ranges": ranges.len(),
            })),
        )
            .into_response(),
        Err(e) => db_error_response("Failed to save course", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TimeGridUpdate {
    pub time_slots: Vec<String>,
    pub classroom: Option<String>,
}

/// PUT /admin/courses/:course_id/timegrid
///
/// Replaces the course's weekly grid with the normalized form of the
/// submitted tokens. An empty token list clears the grid.
pub async fn put_timegrid(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<TimeGridUpdate>,
) -> Response {
    info!("PUT /admin/courses/{}/timegrid", course_id);

    let ranges = compress(&parse_slots(&body.time_slots));
    match s
        .db
        .replace_course_times(&course_id, &ranges, body.classroom.as_deref())
    {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({
                "message": "Time grid updated",
                "course_id": course_id,
                "time_ranges": ranges.len(),
            })),
        )
            .into_response(),
        Ok(false) => {
            ApiErrorType::from((StatusCode::NOT_FOUND, "Course not found", None)).into_response()
        }
        Err(e) => db_error_response("Failed to update time grid", e),
    }
}

fn default_role() -> String {
    "student".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AdminUserIn {
    pub user_id: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// POST /admin/users
///
/// Creates a user or updates an existing one's name and role. This is how
/// students get provisioned on a fresh deployment.
pub async fn post_upsert_user(
    State(s): State<Arc<AppState>>,
    Json(body): Json<AdminUserIn>,
) -> Response {
    info!("POST /admin/users {}", body.user_id);

    if body.user_id.trim().is_empty() {
        return ApiErrorType::from((StatusCode::BAD_REQUEST, "user_id is required", None))
            .into_response();
    }
    if !matches!(body.role.as_str(), "student" | "admin") {
        return ApiErrorType::from((
            StatusCode::BAD_REQUEST,
            "Unknown role",
            Some(body.role.clone()),
        ))
        .into_response();
    }

    match s.db.upsert_user(&body.user_id, &body.name, &body.role) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "User saved",
                "user_id": body.user_id,
                "role": body.role,
            })),
        )
            .into_response(),
        Err(e) => db_error_response("Failed to save user", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletedCourseIn {
    pub course_id: String,
    pub passed: bool,
}

/// POST /admin/users/:user_id/completed-courses
///
/// Records a completed course on a student's transcript. Passed records
/// feed the credit summary; failed ones are kept but count nothing.
pub async fn post_record_completed(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<CompletedCourseIn>,
) -> Response {
    info!(
        "POST /admin/users/{}/completed-courses {}",
        user_id, body.course_id
    );

    match s.db.get_user(&user_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiErrorType::from((StatusCode::NOT_FOUND, "User not found", None))
                .into_response()
        }
        Err(e) => return db_error_response("Failed to fetch user", e),
    }
    match s.db.get_course(&body.course_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiErrorType::from((StatusCode::NOT_FOUND, "Course not found", None))
                .into_response()
        }
        Err(e) => return db_error_response("Failed to fetch course", e),
    }

    match s
        .db
        .record_completed_course(&user_id, &body.course_id, body.passed)
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "Completed course recorded",
                "user_id": user_id,
                "course_id": body.course_id,
                "passed": body.passed,
            })),
        )
            .into_response(),
        Err(e) => db_error_response("Failed to record completed course", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgramIn {
    pub code: String,
    pub name: String,
    /// Courses counting toward the program's credit minimum.
    #[serde(default)]
    pub course_ids: Vec<String>,
}

/// POST /admin/programs
pub async fn post_create_program(
    State(s): State<Arc<AppState>>,
    Json(body): Json<ProgramIn>,
) -> Response {
    info!("POST /admin/programs {}", body.code);

    if let Err(e) = s.db.insert_program(&body.code, &body.name) {
        return db_error_response("Failed to create program", e);
    }
    for course_id in &body.course_ids {
        if let Err(e) = s.db.add_program_course(&body.code, course_id) {
            return db_error_response("Failed to attach program course", e);
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "message": "Program saved",
            "code": body.code,
            "courses": body.course_ids.len(),
        })),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub rows: Vec<AdminCourseIn>,
}

/// POST /admin/courses/import
///
/// Bulk-imports course rows (already tabularized from a spreadsheet by
/// the caller). Rows missing a course id or name are skipped and counted,
/// matching the lenient treatment of malformed time tokens.
pub async fn post_import_courses(
    State(s): State<Arc<AppState>>,
    Json(body): Json<ImportBody>,
) -> Response {
    info!("POST /admin/courses/import {} rows", body.rows.len());

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for row in &body.rows {
        if row.course_id.trim().is_empty() || row.name_zh.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let ranges = row.ranges();
        if let Err(e) =
            s.db.insert_course_with_times(&row.course(), &ranges, row.classroom.as_deref())
        {
            warn!("Import failed for {}: {}", row.course_id, e);
            return db_error_response("Import failed", e);
        }
        imported += 1;
    }

    (
        StatusCode::OK,
        Json(json!({
            "message": "Import finished",
            "imported": imported,
            "skipped": skipped,
        })),
    )
        .into_response()
}
