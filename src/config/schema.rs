//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dashboard.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Local listener configuration.
    pub listener: ListenerConfig,

    /// Upstream webhook API settings.
    pub upstream: UpstreamConfig,

    /// Bundled UI assets.
    pub assets: AssetsConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Upstream webhook API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Store domain (e.g., "mystore.myshopify.com").
    pub store: String,

    /// Access token. Only ever supplied through the CLI or environment.
    #[serde(skip)]
    pub access_token: AccessToken,

    /// Versioned API segment (e.g., "2024-10").
    pub api_version: String,

    /// Overrides `https://{store}` as the upstream origin.
    pub base_url: Option<String>,

    /// Overall upstream request timeout. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// Honour `HTTP(S)_PROXY` environment variables for upstream calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            store: String::new(),
            access_token: AccessToken::default(),
            api_version: "2024-10".to_string(),
            base_url: None,
            timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

/// Opaque access credential for the upstream API.
///
/// `Debug` and `Display` never reveal the secret; use [`AccessToken::expose`]
/// at the single point where the header is built.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Static UI asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the prebuilt dashboard bundle (must contain `index.html`).
    pub dir: Option<PathBuf>,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.upstream.api_version, "2024-10");
        assert!(config.upstream.timeout_secs.is_none());
        assert!(config.assets.dir.is_none());
        assert_eq!(config.limits.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_access_token_is_redacted() {
        let token = AccessToken::new("shpat_secret");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
        assert_eq!(token.to_string(), "***");
        assert_eq!(token.expose(), "shpat_secret");

        let mut config = DashboardConfig::default();
        config.upstream.access_token = token;
        assert!(!format!("{:?}", config).contains("shpat_secret"));
    }

    #[test]
    fn test_access_token_never_serialized() {
        let mut config = DashboardConfig::default();
        config.upstream.store = "demo.myshopify.com".into();
        config.upstream.access_token = AccessToken::new("shpat_secret");

        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("demo.myshopify.com"));
        assert!(!rendered.contains("shpat_secret"));
    }
}
