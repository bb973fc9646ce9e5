//! Upstream webhook API subsystem.
//!
//! # Data Flow
//! ```text
//! WebhookCall (from the dispatcher)
//!     → request.rs (URL, pagination, credential + content-type headers)
//!     → client.rs (single HTTP call, no retries)
//!     → UpstreamResponse (status, content type, link, body bytes)
//! ```
//!
//! # Design Decisions
//! - Stateless per call; the client is shared and read-only
//! - Bodies are opaque bytes in both directions
//! - Upstream 4xx/5xx are responses, not errors

pub mod client;
pub mod request;
pub mod types;

pub use client::UpstreamClient;
pub use request::{UpstreamEndpoint, UpstreamRequest};
pub use types::{
    ListParams, UpstreamError, UpstreamResponse, UpstreamResult, WebhookCall,
    ACCESS_TOKEN_HEADER,
};
