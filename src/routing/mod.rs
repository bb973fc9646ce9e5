//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → matcher.rs (collection or item path, raw id segment)
//!     → router.rs (method check, id validation)
//!     → Return: Route or RouteError
//! ```
//!
//! # Design Decisions
//! - Routes are fixed at compile time
//! - Deterministic: same input always matches same route
//! - Ids are validated into a typed value, never sliced ad hoc

pub mod matcher;
pub mod router;

pub use matcher::{IdError, WebhookId, WEBHOOKS_PATH};
pub use router::{resolve, Route, RouteError};
