use axum::http::StatusCode;

use crate::application::admin::{contents::AdminContentError, modules::AdminModuleError};
use crate::application::error::HttpError;
use crate::domain::error::DomainError;
use crate::infra::http::repo_error_to_http;

/// Field problems are echoed on the form rather than answered as an error
/// page.
pub(super) fn form_message(err: &AdminContentError) -> Option<String> {
    match err {
        AdminContentError::ConstraintViolation(_) | AdminContentError::InvalidUrl { .. } => {
            Some(err.to_string())
        }
        _ => None,
    }
}

pub(super) fn admin_content_error(source: &'static str, err: AdminContentError) -> HttpError {
    match err {
        AdminContentError::ConstraintViolation(field) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Content request could not be processed",
            format!("Invalid field `{field}`"),
        ),
        AdminContentError::InvalidUrl { .. } => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Content request could not be processed",
            &err,
        ),
        AdminContentError::NotFound(entity) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            format!("{entity} not found for owner"),
        ),
        AdminContentError::Domain(DomainError::Validation { .. }) => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Content request could not be processed",
            &err,
        ),
        AdminContentError::Domain(_) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error occurred",
            &err,
        ),
        AdminContentError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

pub(super) fn sibling_modules_error(source: &'static str, err: AdminModuleError) -> HttpError {
    match err {
        AdminModuleError::NotFound(entity) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            format!("{entity} not found for owner"),
        ),
        AdminModuleError::Repo(repo) => repo_error_to_http(source, repo),
        other => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error occurred",
            &other,
        ),
    }
}
