//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{AccessToken, DashboardConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file. Validation happens after CLI overrides are merged.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Command line interface of the dashboard binary.
#[derive(Debug, Parser)]
#[command(name = "webhooks-dashboard")]
#[command(about = "Local dashboard for managing Shopify webhook subscriptions", long_about = None)]
pub struct Cli {
    /// Shopify store domain (e.g., mystore.myshopify.com)
    #[arg(long, env = "SHOPIFY_STORE")]
    pub store: String,

    /// Shopify Admin API access token
    #[arg(long = "api-key", env = "SHOPIFY_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Local bind address (overrides the config file)
    #[arg(long)]
    pub bind: Option<String>,

    /// Directory with the prebuilt dashboard UI (index.html and its assets).
    /// The UI is not bundled into the binary: without this flag only the
    /// /api/webhooks endpoints and /healthz are served and other paths are 404
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Admin API version segment
    #[arg(long)]
    pub api_version: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Merge the optional config file with CLI overrides and validate the result.
    pub fn into_config(self) -> Result<DashboardConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DashboardConfig::default(),
        };

        config.upstream.store = self.store.trim().to_string();
        config.upstream.access_token = AccessToken::new(self.api_key);
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(dir) = self.assets_dir {
            config.assets.dir = Some(dir);
        }
        if let Some(version) = self.api_version {
            config.upstream.api_version = version;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_partial_file() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [upstream]
            api_version = "2025-01"
            timeout_secs = 15

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.upstream.api_version, "2025-01");
        assert_eq!(config.upstream.timeout_secs, Some(15));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.limits.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_token_in_file_is_ignored() {
        let config = parse_config(
            r#"
            [upstream]
            access_token = "from-file"
            "#,
        )
        .unwrap();
        assert!(config.upstream.access_token.is_empty());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[listener]\nbind_address = \"127.0.0.1:4000\"\n[upstream]\napi_version = \"2025-01\""
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "webhooks-dashboard",
            "--store",
            "demo.myshopify.com",
            "--api-key",
            "shpat_123",
            "--config",
            file.path().to_str().unwrap(),
            "--bind",
            "127.0.0.1:5000",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:5000");
        assert_eq!(config.upstream.api_version, "2025-01");
        assert_eq!(config.upstream.store, "demo.myshopify.com");
        assert_eq!(config.upstream.access_token.expose(), "shpat_123");
    }

    #[test]
    fn test_cli_rejects_empty_store() {
        let cli = Cli::try_parse_from([
            "webhooks-dashboard",
            "--store",
            "",
            "--api-key",
            "shpat_123",
        ])
        .unwrap();
        let err = cli.into_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &[ValidationError::MissingStore]));
        assert!(err.to_string().contains("store domain is required"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
