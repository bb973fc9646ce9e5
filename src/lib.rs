//! Local webhook dashboard server library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::DashboardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
