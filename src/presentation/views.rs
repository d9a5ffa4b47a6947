//! Turning askama templates into HTTP responses.

use askama::Template;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::application::error::HttpError;

const SOURCE: &str = "presentation::views::render_template";

/// Render `template`, mapping a render failure to a 500 that carries the
/// askama error in its diagnostic chain.
pub fn render_template<T: Template>(template: &T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        HttpError::from_error(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Template rendering failed",
            &err,
        )
    })
}

/// Admin pages reflect live data; every rendered page is marked uncacheable.
pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(&template) {
        Ok(html) => {
            let mut response = (status, html).into_response();
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            response
        }
        Err(err) => err.into_response(),
    }
}
