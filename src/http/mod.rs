//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Local request
//!     → request.rs (request ID, bounded body read)
//!     → server.rs (webhook path? dispatch : static assets)
//!     → routing (method + path → Route)
//!     → upstream (translate + single call)
//!     → response.rs (relay status, headers, body)
//!     → Send to client
//! ```

pub mod assets;
pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
