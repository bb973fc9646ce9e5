//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the store is a bare host and the credential is a usable header value
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::DashboardConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("store domain is required")]
    MissingStore,

    #[error("store '{0}' must be a bare domain such as mystore.myshopify.com")]
    InvalidStore(String),

    #[error("access token is required")]
    MissingAccessToken,

    #[error("access token contains characters not allowed in an HTTP header")]
    InvalidAccessToken,

    #[error("api version must not be empty")]
    MissingApiVersion,

    #[error("bind address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream base url '{0}' is not a valid http(s) url")]
    InvalidBaseUrl(String),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let upstream = &config.upstream;

    let store = upstream.store.trim();
    if store.is_empty() {
        errors.push(ValidationError::MissingStore);
    } else if !is_bare_host(store) {
        errors.push(ValidationError::InvalidStore(upstream.store.clone()));
    }

    if upstream.access_token.is_empty() {
        errors.push(ValidationError::MissingAccessToken);
    } else if HeaderValue::from_str(upstream.access_token.expose()).is_err() {
        errors.push(ValidationError::InvalidAccessToken);
    }

    if upstream.api_version.trim().is_empty() {
        errors.push(ValidationError::MissingApiVersion);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(base) = &upstream.base_url {
        let valid = Url::parse(base)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidBaseUrl(base.clone()));
        }
    }

    if upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A store must round-trip as the host of `https://{store}` with nothing else attached.
fn is_bare_host(store: &str) -> bool {
    if store.contains(['/', '?', '#', '@', ' ']) {
        return false;
    }
    match Url::parse(&format!("https://{}", store)) {
        Ok(url) => url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(store)),
        Err(_) => false,
    }
}
