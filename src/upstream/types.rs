//! Upstream-facing types and error definitions.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::routing::WebhookId;

/// Header carrying the access credential on every upstream call.
pub const ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

/// Pagination parameters of a list call. Both values are opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<String>,
    pub page_info: Option<String>,
}

impl ListParams {
    /// Read `limit` and `page_info` from a raw query string.
    ///
    /// A repeated key keeps its first value and unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let pairs = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes());
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "limit" => &mut params.limit,
                "page_info" => &mut params.page_info,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Drop empty values so they are treated as absent.
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            limit: keep(self.limit),
            page_info: keep(self.page_info),
        }
    }
}

/// A dispatched webhook operation ready for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookCall {
    List(ListParams),
    Create(Bytes),
    Update(WebhookId, Bytes),
    Delete(WebhookId),
}

/// What an upstream call returned. The body is never parsed.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub link: Option<HeaderValue>,
    pub body: Bytes,
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream URL could not be built.
    #[error("Invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// The credential cannot be carried in a header.
    #[error("Access token is not a valid header value")]
    InvalidCredential,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connect, TLS or send failure.
    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read to completion.
    #[error("Failed to read upstream response: {0}")]
    Body(#[source] reqwest::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
