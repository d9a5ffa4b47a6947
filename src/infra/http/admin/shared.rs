use axum::http::StatusCode;

use crate::{application::error::HttpError, domain::types::ContentKind};

pub(super) fn blank_to_none_opt(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Kinds outside the known set answer 404 rather than 400, as an unknown
/// path segment would.
pub(super) fn parse_kind(source: &'static str, raw: &str) -> Result<ContentKind, HttpError> {
    raw.parse::<ContentKind>().map_err(|_| {
        HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            format!("unknown content kind `{raw}`"),
        )
    })
}

pub(super) fn format_date(value: time::OffsetDateTime) -> String {
    let date = value.date();
    format!("{}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}
