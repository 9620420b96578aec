//! Content versioning for conditional GETs.
//!
//! Public content is cheap to rebuild but hot, so responses carry a weak
//! ETag derived from a process-wide version counter. Admin mutations bump
//! the counter, which invalidates every previously issued tag at once.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

static CONTENT_VERSION: AtomicU64 = AtomicU64::new(1);

pub fn current_version() -> u64 {
    CONTENT_VERSION.load(Ordering::Relaxed)
}

/// Called after any admin write that can change public content.
pub fn bump_version() -> u64 {
    CONTENT_VERSION.fetch_add(1, Ordering::Relaxed) + 1
}

pub fn etag() -> String {
    format!("W/\"content-v{}\"", current_version())
}

/// Serializes `body` with the current content ETag, or answers 304 when the
/// client already holds it.
pub fn with_etag<T: Serialize>(request_headers: &HeaderMap, body: &T) -> Response {
    let tag = etag();

    let matched = request_headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|candidate| candidate.trim() == tag));

    if matched {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, tag)]).into_response();
    }

    (StatusCode::OK, [(header::ETAG, tag)], Json(body)).into_response()
}
