//! Catalog browsing and search endpoints.

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::db::CourseFilters;
use crate::server::types::ApiErrorType;
use crate::server::util::{course_payload, db_error_response};
use crate::timetable::{parse_slots, WeekSlot};
use crate::types::AppState;

fn default_page() -> u32 {
    1
}
fn default_page_size() -> u32 {
    20
}

/// Query parameters for course search.
///
/// The time-grid filter is not a field here: the client sends the
/// `time_slots` key repeatedly (`time_slots=1-1&time_slots=1-2`), which a
/// derived struct deserializer would reject as a duplicate field. Those
/// values are collected from the raw query string instead.
#[derive(Debug, Deserialize)]
pub struct CourseSearchParams {
    pub course_id: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<i32>,
    pub department_id: Option<String>,
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub required_type: Option<String>,
    pub credit: Option<i32>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl CourseSearchParams {
    /// Builds db filters, clamping pagination once at this boundary; the
    /// clamped values are what the handler echoes back.
    fn into_filters(self, slots: Vec<WeekSlot>) -> CourseFilters {
        CourseFilters {
            course_id: self.course_id,
            semester: self.semester,
            grade: self.grade,
            department_id: self.department_id,
            keyword: self.keyword,
            category: self.category,
            required_type: self.required_type,
            credit: self.credit,
            slots,
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, 100),
        }
    }
}

/// Collects `time_slots` values from the raw query string. The grid
/// selector sends the key once per selected cell; comma-separated values
/// in a single key are accepted too. Malformed tokens are dropped later
/// by the parser.
fn time_slot_tokens(raw_query: Option<&str>) -> Vec<String> {
    raw_query
        .unwrap_or("")
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "time_slots")
        .flat_map(|(_, value)| value.split(','))
        .map(str::to_string)
        .collect()
}

/// GET /courses
///
/// Searches the catalog with field filters and an optional time-grid
/// filter; returns a page of courses with their weekly times.
pub async fn get_search_courses(
    State(s): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<CourseSearchParams>,
) -> Response {
    info!("GET /courses (page={})", params.page);

    let tokens = time_slot_tokens(raw_query.as_deref());
    let filters = params.into_filters(parse_slots(&tokens));

    let (total, courses) = match s.db.search_courses(&filters) {
        Ok(r) => r,
        Err(e) => return db_error_response("Failed to search courses", e),
    };

    let mut items = Vec::with_capacity(courses.len());
    for course in &courses {
        match course_payload(&s.db, course) {
            Ok(v) => items.push(v),
            Err(e) => return db_error_response("Failed to fetch course times", e),
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "page": filters.page,
            "page_size": filters.page_size,
            "total": total,
            "items": items,
        })),
    )
        .into_response()
}

/// GET /courses/:course_id
pub async fn get_course_detail(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}", course_id);

    match s.db.get_course(&course_id) {
        Ok(Some(course)) => match course_payload(&s.db, &course) {
            Ok(v) => (StatusCode::OK, Json(v)).into_response(),
            Err(e) => db_error_response("Failed to fetch course times", e),
        },
        Ok(None) => {
            ApiErrorType::from((StatusCode::NOT_FOUND, "Course not found", None)).into_response()
        }
        Err(e) => db_error_response("Failed to fetch course", e),
    }
}
