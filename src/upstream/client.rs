//! Upstream webhook API client.
//!
//! # Responsibilities
//! - Hold the shared HTTP client, endpoint and credential
//! - Issue exactly one request per webhook call
//! - Collect status, headers of interest and the full body

use std::time::Duration;

use axum::http::header::{CONTENT_TYPE, LINK};

use crate::config::{AccessToken, UpstreamConfig};
use crate::upstream::request::{UpstreamEndpoint, UpstreamRequest};
use crate::upstream::types::{UpstreamError, UpstreamResponse, UpstreamResult, WebhookCall};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the upstream webhook API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: UpstreamEndpoint,
    token: AccessToken,
}

impl UpstreamClient {
    /// Create a client from validated upstream configuration.
    ///
    /// No retries are configured. A timeout is applied only when
    /// `timeout_secs` is set.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        let endpoint = UpstreamEndpoint::from_config(config)?;
        tracing::debug!(
            store = %config.store,
            api_version = %config.api_version,
            timeout_secs = ?config.timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            token: config.access_token.clone(),
        })
    }

    /// Translate and execute a webhook call.
    pub async fn execute(&self, call: WebhookCall) -> UpstreamResult<UpstreamResponse> {
        let request = UpstreamRequest::build(&self.endpoint, &self.token, call)?;
        self.send(request).await
    }

    /// Send an already translated request.
    pub async fn send(&self, request: UpstreamRequest) -> UpstreamResult<UpstreamResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Calling upstream");

        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(UpstreamError::Transport)?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let link = response.headers().get(LINK).cloned();
        let body = response.bytes().await.map_err(UpstreamError::Body)?;

        tracing::debug!(
            status = %status,
            body_bytes = body.len(),
            has_link = link.is_some(),
            "Upstream responded"
        );

        Ok(UpstreamResponse {
            status,
            content_type,
            link,
            body,
        })
    }

    pub fn endpoint(&self) -> &UpstreamEndpoint {
        &self.endpoint
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .finish()
    }
}
