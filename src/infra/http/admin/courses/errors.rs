use axum::http::StatusCode;

use crate::application::{admin::courses::AdminCourseError, error::HttpError};
use crate::infra::http::repo_error_to_http;

/// Validation failures are shown on the form instead of becoming an error
/// page.
pub(super) fn form_message(err: &AdminCourseError) -> Option<String> {
    match err {
        AdminCourseError::ConstraintViolation(_)
        | AdminCourseError::UnknownSubject
        | AdminCourseError::InvalidSlug(_)
        | AdminCourseError::SlugTaken(_) => Some(err.to_string()),
        AdminCourseError::NotFound | AdminCourseError::Repo(_) => None,
    }
}

pub(super) fn admin_course_error(source: &'static str, err: AdminCourseError) -> HttpError {
    match err {
        AdminCourseError::ConstraintViolation(field) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Course request could not be processed",
            format!("Invalid field `{field}`"),
        ),
        AdminCourseError::UnknownSubject
        | AdminCourseError::InvalidSlug(_)
        | AdminCourseError::SlugTaken(_) => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Course request could not be processed",
            &err,
        ),
        AdminCourseError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Course not found",
            "course not found for owner",
        ),
        AdminCourseError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
