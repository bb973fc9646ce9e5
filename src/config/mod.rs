//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment (store, access token, overrides)
//!     + optional config file (TOML)
//!     → loader.rs (parse & merge)
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//!     → passed by value into the server, shared via Arc by handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - The access token never comes from, or goes to, a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{Cli, ConfigError};
pub use schema::{
    AccessToken, AssetsConfig, DashboardConfig, LimitsConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, UpstreamConfig,
};
pub use validation::ValidationError;
