//! JSON endpoints the reorder script posts to.
//!
//! The body is a flat `{"<id>": <position>}` object. These endpoints answer
//! JSON in both directions and are not subject to the form CSRF check.

use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    application::admin::ordering::AdminOrderingError,
    domain::ordering::ReorderPayload,
    infra::http::error::{ApiError, codes},
};

use super::AdminState;

#[derive(Debug, Clone, Copy)]
enum OrderedList {
    Modules,
    Contents,
}

impl OrderedList {
    fn as_str(self) -> &'static str {
        match self {
            OrderedList::Modules => "modules",
            OrderedList::Contents => "contents",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSaved {
    pub saved: String,
}

impl OrderSaved {
    fn ok() -> Self {
        Self {
            saved: "OK".to_string(),
        }
    }
}

pub(crate) async fn admin_module_order(
    State(state): State<AdminState>,
    payload: Result<Json<ReorderPayload>, JsonRejection>,
) -> Response {
    persist_order(&state, OrderedList::Modules, payload).await
}

pub(crate) async fn admin_content_order(
    State(state): State<AdminState>,
    payload: Result<Json<ReorderPayload>, JsonRejection>,
) -> Response {
    persist_order(&state, OrderedList::Contents, payload).await
}

async fn persist_order(
    state: &AdminState,
    list: OrderedList,
    payload: Result<Json<ReorderPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            counter!("lectern_order_rejected_total", "list" => list.as_str()).increment(1);
            return ApiError::bad_request(
                "Order payload could not be read",
                Some(rejection.body_text()),
            )
            .into_response();
        }
    };

    let started = Instant::now();
    let result = match list {
        OrderedList::Modules => state.ordering.reorder_modules(state.owner(), &payload).await,
        OrderedList::Contents => state.ordering.reorder_contents(state.owner(), &payload).await,
    };
    histogram!("lectern_order_apply_ms", "list" => list.as_str())
        .record(started.elapsed().as_secs_f64() * 1000.0);

    match result {
        Ok(outcome) => {
            counter!("lectern_order_saved_total", "list" => list.as_str()).increment(1);
            debug!(
                target = "lectern::http::admin::order",
                list = list.as_str(),
                submitted = outcome.submitted,
                applied = outcome.applied,
                "order saved"
            );
            (StatusCode::OK, Json(OrderSaved::ok())).into_response()
        }
        Err(err) => {
            counter!("lectern_order_rejected_total", "list" => list.as_str()).increment(1);
            warn!(
                target = "lectern::http::admin::order",
                list = list.as_str(),
                error = %err,
                "order payload rejected"
            );
            ordering_error(err).into_response()
        }
    }
}

fn ordering_error(err: AdminOrderingError) -> ApiError {
    match err {
        AdminOrderingError::InvalidIdentifier(id) => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_IDENTIFIER,
            "Order payload holds an unknown identifier",
            Some(format!("`{id}` is not a valid identifier")),
        ),
        AdminOrderingError::PositionOutOfRange { id, position } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_POSITION,
            "Order payload holds an invalid position",
            Some(format!("position {position} of `{id}` is out of range")),
        ),
        AdminOrderingError::Repo(repo) => ApiError::from(repo),
    }
}
