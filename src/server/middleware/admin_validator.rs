//! Middleware restricting a route tree to admin users.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::db::DbUser;
use crate::server::types::ApiErrorType;

/// Requires the resolved user (from `validate_user`) to have role `admin`.
pub async fn require_admin(req: Request, next: Next) -> Response {
    match req.extensions().get::<DbUser>() {
        Some(user) if user.is_admin() => next.run(req).await,
        Some(user) => {
            warn!("Non-admin user {} hit an admin endpoint", user.user_id);
            ApiErrorType::from((StatusCode::FORBIDDEN, "Admin only", None)).into_response()
        }
        None => {
            ApiErrorType::from((StatusCode::UNAUTHORIZED, "Missing user context", None))
                .into_response()
        }
    }
}
