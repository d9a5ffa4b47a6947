mod admin;
mod error;
mod middleware;

pub use admin::{AdminState, AdminStores, CsrfGuard, OrderSaved, build_admin_router};
pub use error::{ApiError, ApiErrorBody, ApiErrorMessage};

use crate::application::{error::HttpError, repos::RepoError};

/// Plain-text counterpart of the JSON repository mapping, for the form pages.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    let (status, _, public_message) = error::classify_repo_error(&err);
    HttpError::from_error(source, status, public_message, &err)
}
