//! Credit-progress and program endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::db::DbUser;
use crate::server::types::ApiErrorType;
use crate::server::util::db_error_response;
use crate::types::AppState;

/// GET /credits/programs
pub async fn get_programs(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /credits/programs");

    match s.db.list_programs() {
        Ok(programs) => (StatusCode::OK, Json(programs)).into_response(),
        Err(e) => db_error_response("Failed to list programs", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetProgramBody {
    pub program_code: String,
}

/// PUT /students/me/program
pub async fn put_my_program(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
    Json(body): Json<SetProgramBody>,
) -> Response {
    info!(
        "PUT /students/me/program {} (user={})",
        body.program_code, user.user_id
    );

    match s.db.set_student_program(&user.user_id, &body.program_code) {
        Ok(true) => match s.db.student_program(&user.user_id) {
            Ok(program) => (StatusCode::OK, Json(json!({ "program": program }))).into_response(),
            Err(e) => db_error_response("Failed to fetch program", e),
        },
        Ok(false) => {
            ApiErrorType::from((StatusCode::NOT_FOUND, "Program not found", None)).into_response()
        }
        Err(e) => db_error_response("Failed to set program", e),
    }
}

/// GET /students/me/credits/summary
///
/// Graduation totals, category breakdown, and program progress, computed
/// from passed completed coursework.
pub async fn get_credit_summary(
    State(s): State<Arc<AppState>>,
    Extension(user): Extension<DbUser>,
) -> Response {
    info!("GET /students/me/credits/summary (user={})", user.user_id);

    let cfg = s.credits.config();
    let earned = match s.db.earned_credits(
        &user.user_id,
        &cfg.major_required_pattern,
        &cfg.general_required_pattern,
    ) {
        Ok(e) => e,
        Err(e) => return db_error_response("Failed to aggregate credits", e),
    };
    let program = match s.db.student_program(&user.user_id) {
        Ok(p) => p,
        Err(e) => return db_error_response("Failed to fetch program", e),
    };

    let summary = s.credits.compute_summary(&earned, program);
    (StatusCode::OK, Json(summary)).into_response()
}
