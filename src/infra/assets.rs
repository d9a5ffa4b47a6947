//! Embedded admin stylesheet and reorder script.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

static ADMIN_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static/admin");

const SOURCE: &str = "infra::assets::serve_admin";

/// Serve a file from the embedded admin bundle.
pub async fn serve_admin(path: Option<Path<String>>) -> Response {
    let captured = path.map(|Path(value)| value);
    match resolve_asset(&ADMIN_ASSETS, captured) {
        Some(asset) => asset.into_response(),
        None => {
            let mut response = StatusCode::NOT_FOUND.into_response();
            ErrorReport::from_message(SOURCE, StatusCode::NOT_FOUND, "Static asset not found")
                .attach(&mut response);
            response
        }
    }
}

struct Asset {
    contents: &'static [u8],
    mime: Mime,
}

fn resolve_asset(bundle: &'static Dir<'static>, path: Option<String>) -> Option<Asset> {
    let raw = path.unwrap_or_default();
    let candidate = raw.trim_start_matches('/');

    // No traversal and no directory listings.
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    Some(Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate).first_or_octet_stream(),
    })
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let bytes = Bytes::from_static(self.contents);
        let len = bytes.len();
        let mut response = Response::new(Body::from(bytes));

        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(self.mime.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_contains_the_reorder_script() {
        let asset = resolve_asset(&ADMIN_ASSETS, Some("reorder.js".into())).expect("script");
        assert!(asset.mime.essence_str().ends_with("javascript"));
        assert!(
            std::str::from_utf8(asset.contents)
                .expect("utf8")
                .contains("data-reorder-endpoint")
        );
    }

    #[test]
    fn traversal_and_directories_are_refused() {
        assert!(resolve_asset(&ADMIN_ASSETS, Some("../Cargo.toml".into())).is_none());
        assert!(resolve_asset(&ADMIN_ASSETS, Some("/".into())).is_none());
        assert!(resolve_asset(&ADMIN_ASSETS, None).is_none());
    }
}
