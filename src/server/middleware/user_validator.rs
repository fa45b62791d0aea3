//! Request middleware resolving the calling student.
//!
//! Authentication proper lives in front of this service; by the time a
//! request gets here the gateway has verified the token and forwarded the
//! student id in the `x-student-id` header. This middleware only checks
//! that the id maps to a known user and attaches the user record to the
//! request.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::server::types::ApiErrorType;
use crate::types::AppState;

pub const STUDENT_ID_HEADER: &str = "x-student-id";

/// Resolves `x-student-id` to a user and stores it in request extensions.
pub async fn validate_user(
    State(s): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(user_id) = req
        .headers()
        .get(STUDENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    else {
        return ApiErrorType::from((
            StatusCode::UNAUTHORIZED,
            "Missing x-student-id header",
            None,
        ))
        .into_response();
    };

    match s.db.get_user(&user_id) {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => {
            warn!("Unknown user id in {}: {}", STUDENT_ID_HEADER, user_id);
            ApiErrorType::from((StatusCode::UNAUTHORIZED, "Unknown user", None)).into_response()
        }
        Err(e) => ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to look up user",
            Some(e.to_string()),
        ))
        .into_response(),
    }
}
