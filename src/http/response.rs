//! Response relay from upstream to the local caller.
//!
//! # Responsibilities
//! - Copy the upstream status code
//! - Copy `Content-Type`, and `Link` for list responses
//! - Forward body bytes unchanged (or drop them for delete)
//!
//! # Design Decisions
//! - No re-encoding: the body is the exact `Bytes` read from upstream
//! - Upstream error statuses are relayed, not translated
//! - No other upstream headers cross the boundary

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LINK};
use axum::http::HeaderValue;
use axum::response::Response;

use crate::routing::Route;
use crate::upstream::UpstreamResponse;

/// Build the local response for a completed upstream call.
pub fn relay(route: &Route, upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = upstream.status;

    if matches!(route, Route::Delete(_)) {
        return response;
    }

    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        upstream
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    if matches!(route, Route::List) {
        if let Some(link) = upstream.link {
            headers.insert(LINK, link);
        }
    }

    *response.body_mut() = Body::from(upstream.body);
    response
}
