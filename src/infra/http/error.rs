use crate::application::{error::ErrorReport, repos::RepoError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const INVALID_IDENTIFIER: &str = "invalid_identifier";
    pub const INVALID_POSITION: &str = "invalid_position";
    pub const DUPLICATE: &str = "duplicate";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INTEGRITY: &str = "integrity_error";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// JSON error answered by the order endpoints.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http::api",
            self.status,
            format!("{}: {}", self.code, hint.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}

/// Status, error code and public message for a repository failure. HTML and
/// JSON surfaces both answer from this table.
pub(crate) fn classify_repo_error(err: &RepoError) -> (StatusCode, &'static str, &'static str) {
    match err {
        RepoError::Duplicate { .. } => (StatusCode::CONFLICT, codes::DUPLICATE, "Duplicate record"),
        RepoError::NotFound => (
            StatusCode::NOT_FOUND,
            codes::INVALID_IDENTIFIER,
            "Resource not found",
        ),
        RepoError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, codes::INVALID_INPUT, "Invalid input")
        }
        RepoError::Integrity { .. } => (
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
        ),
        RepoError::Timeout => (
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
        ),
        RepoError::Persistence(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
        ),
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let (status, code, message) = classify_repo_error(&err);
        let hint = match err {
            RepoError::Duplicate { constraint } => Some(constraint),
            RepoError::InvalidInput { message } | RepoError::Integrity { message } => {
                Some(message)
            }
            RepoError::Persistence(message) => Some(message),
            RepoError::NotFound | RepoError::Timeout => None,
        };
        Self::new(status, code, message, hint)
    }
}
