//! Request identification and body handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the caller sent one
//! - Echo the ID on the response for correlation
//! - Read bounded request bodies for create/update
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body limit enforced while reading, before any upstream work

use axum::body::{Body, Bytes};
use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::http::error::ProxyError;

/// Correlation header set on every request and response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a UUID to requests that lack an `x-request-id`.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Convenient access to the request ID header.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Read a create/update body, rejecting unreadable, oversized or empty payloads.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| ProxyError::UnreadableBody)?;
    if bytes.is_empty() {
        return Err(ProxyError::MissingBody);
    }
    Ok(bytes)
}
