//! Favorite-courses endpoints.

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
use crate::server::types::ApiErrorType;
use crate::server::util::{course_payload, db_error_response};
use crate::types::AppState;

/// POST /favorites/:course_id
pub async fn post_add_favorite(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("POST /favorites/{} (user={})", course_id, user.user_id);

    match s.db.get_course(&course_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ApiErrorType::from((StatusCode::NOT_FOUND, "Course not found", None))
                .into_response()
        }
        Err(e) => return db_error_response("Failed to fetch course", e),
    }

    match s.db.add_favorite(&user.user_id, &course_id) {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "Added to favorites" })),
        )
            .into_response(),
        Ok(false) => {
            ApiErrorType::from((StatusCode::BAD_REQUEST, "Already in favorites", None))
                .into_response()
        }
        Err(e) => db_error_response("Failed to add favorite", e),
    }
}

/// GET /favorites
///
/// Lists the user's favorited courses with their weekly times.
pub async fn get_favorites(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("GET /favorites (user={})", user.user_id);

    let courses = match s.db.favorite_courses(&user.user_id) {
        Ok(c) => c,
        Err(e) => return db_error_response("Failed to list favorites", e),
    };

    let mut items = Vec::with_capacity(courses.len());
    for course in &courses {
        match course_payload(&s.db, course) {
            Ok(mut v) => {
                v["is_favorite"] = json!(true);
                items.push(v);
            }
            Err(e) => return db_error_response("Failed to fetch course times", e),
        }
    }

    (StatusCode::OK, Json(json!({ "total": items.len(), "items": items }))).into_response()
}

/// DELETE /favorites/:course_id
pub async fn delete_favorite(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("DELETE /favorites/{} (user={})", course_id, user.user_id);

    match s.db.remove_favorite(&user.user_id, &course_id) {
        Ok(true) => (StatusCode::OK, Json(json!({ "message": "Removed" }))).into_response(),
        Ok(false) => {
            ApiErrorType::from((StatusCode::NOT_FOUND, "Favorite not found", None)).into_response()
        }
        Err(e) => db_error_response("Failed to remove favorite", e),
    }
}
