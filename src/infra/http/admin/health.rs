use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AdminState;
use crate::application::error::ErrorReport;

/// 204 while the store answers, 503 otherwise.
pub(super) async fn admin_health(State(state): State<AdminState>) -> Response {
    match state.health.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::admin::health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
