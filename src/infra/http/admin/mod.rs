mod contents;
mod courses;
mod csrf;
mod health;
mod modules;
mod order;
mod routes;
mod shared;
mod state;

pub use csrf::CsrfGuard;
pub use order::OrderSaved;
pub use state::{AdminState, AdminStores};

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::infra::assets;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(routes::COURSES) }))
        .route(routes::COURSES, get(courses::admin_courses))
        .route(routes::COURSE_NEW, get(courses::admin_course_new))
        .route(routes::COURSE_CREATE, post(courses::admin_course_create))
        .route(
            "/courses/{id}/edit",
            get(courses::admin_course_edit).post(courses::admin_course_update),
        )
        .route(
            "/courses/{id}/delete",
            get(courses::admin_course_delete_confirm).post(courses::admin_course_delete),
        )
        .route(
            "/courses/{id}/modules",
            get(modules::admin_course_modules).post(modules::admin_module_create),
        )
        .route(routes::MODULE_ORDER, post(order::admin_module_order))
        .route("/modules/{id}", get(contents::admin_module_contents))
        .route("/modules/{id}/update", post(modules::admin_module_update))
        .route("/modules/{id}/delete", post(modules::admin_module_delete))
        .route(
            "/modules/{id}/content/{kind}/create",
            get(contents::admin_content_new).post(contents::admin_content_create),
        )
        .route(
            "/modules/{id}/content/{kind}/{item_id}",
            get(contents::admin_content_edit).post(contents::admin_content_update),
        )
        .route(routes::CONTENT_ORDER, post(order::admin_content_order))
        .route("/content/{id}/delete", post(contents::admin_content_delete))
        .route("/_health/db", get(health::admin_health))
        .route("/static/admin/{*path}", get(assets::serve_admin))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
