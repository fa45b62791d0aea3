use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{middleware as mw, Router};

use crate::server::endpoints::{admin, courses, credits, favorites, selections, simulate, status};
use crate::server::middleware::{admin_validator, user_validator};
use crate::types::AppState;

mod endpoints;
mod middleware;
mod types;
mod util;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Routes requiring a resolved student
    let student_router = Router::new()
        .route("/favorites", get(favorites::get_favorites))
        .route(
            "/favorites/:course_id",
            post(favorites::post_add_favorite).delete(favorites::delete_favorite),
        )
        .route("/simulate", get(simulate::get_simulated))
        .route(
            "/simulate/:course_id",
            post(simulate::post_add_simulated).delete(simulate::delete_simulated),
        )
        .route("/selections", post(selections::post_add_selection))
        .route(
            "/selections/batch",
            post(selections::post_add_selections_batch),
        )
        .route("/timetable", get(selections::get_timetable))
        .route("/students/me/program", put(credits::put_my_program))
        .route(
            "/students/me/credits/summary",
            get(credits::get_credit_summary),
        )
        .layer(mw::from_fn_with_state(
            app_state.clone(),
            user_validator::validate_user,
        ));

    // Admin routes: user resolution first, then the role check
    let admin_router = Router::new()
        .route("/admin/users", post(admin::post_upsert_user))
        .route(
            "/admin/users/:user_id/completed-courses",
            post(admin::post_record_completed),
        )
        .route("/admin/courses", post(admin::post_create_course))
        .route("/admin/courses/import", post(admin::post_import_courses))
        .route("/admin/programs", post(admin::post_create_program))
        .route(
            "/admin/courses/:course_id/timegrid",
            put(admin::put_timegrid),
        )
        .layer(mw::from_fn(admin_validator::require_admin))
        .layer(mw::from_fn_with_state(
            app_state.clone(),
            user_validator::validate_user,
        ));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/courses", get(courses::get_search_courses))
        .route("/courses/:course_id", get(courses::get_course_detail))
        .route("/credits/programs", get(credits::get_programs))
        .merge(student_router)
        .merge(admin_router)
        .with_state(app_state)
}
