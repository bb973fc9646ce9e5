//! Upstream request translation.
//!
//! # Responsibilities
//! - Build the versioned collection and item URLs
//! - Append pagination parameters only when supplied
//! - Attach the credential and content-type headers
//! - Carry create/update bodies through untouched
//!
//! # Design Decisions
//! - Pure: no I/O, so every URL and header rule is unit tested here
//! - The credential header value is marked sensitive so `Debug` hides it
//! - `limit` always precedes `page_info` in the query string

use axum::body::Bytes;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use crate::config::{AccessToken, UpstreamConfig};
use crate::routing::WebhookId;
use crate::upstream::types::{
    ListParams, UpstreamError, UpstreamResult, WebhookCall, ACCESS_TOKEN_HEADER,
};

const APPLICATION_JSON: &str = "application/json";

/// Resolved location of the versioned webhook API.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoint {
    /// `{base}/admin/api/{version}/`, always with a trailing slash.
    api_root: Url,
}

impl UpstreamEndpoint {
    /// Resolve the endpoint from `base_url`, or `https://{store}` when unset.
    pub fn from_config(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base = match &config.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", config.store),
        };
        let api_root = Url::parse(&format!(
            "{}/admin/api/{}/",
            base,
            config.api_version.trim_matches('/')
        ))?;
        Ok(Self { api_root })
    }

    /// `.../webhooks.json`
    pub fn collection_url(&self) -> UpstreamResult<Url> {
        Ok(self.api_root.join("webhooks.json")?)
    }

    /// `.../webhooks/{id}.json`
    pub fn item_url(&self, id: &WebhookId) -> UpstreamResult<Url> {
        Ok(self.api_root.join(&format!("webhooks/{}.json", id))?)
    }
}

/// A fully translated upstream request.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl UpstreamRequest {
    /// Translate a webhook call into its upstream shape.
    pub fn build(
        endpoint: &UpstreamEndpoint,
        token: &AccessToken,
        call: WebhookCall,
    ) -> UpstreamResult<Self> {
        let mut headers = HeaderMap::new();
        let mut credential =
            HeaderValue::from_str(token.expose()).map_err(|_| UpstreamError::InvalidCredential)?;
        credential.set_sensitive(true);
        headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), credential);
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        let (method, url, body) = match call {
            WebhookCall::List(params) => (Method::GET, list_url(endpoint, params)?, None),
            WebhookCall::Create(body) => (Method::POST, endpoint.collection_url()?, Some(body)),
            WebhookCall::Update(id, body) => (Method::PUT, endpoint.item_url(&id)?, Some(body)),
            WebhookCall::Delete(id) => (Method::DELETE, endpoint.item_url(&id)?, None),
        };

        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

fn list_url(endpoint: &UpstreamEndpoint, params: ListParams) -> UpstreamResult<Url> {
    let params = params.normalized();
    let mut url = endpoint.collection_url()?;
    if params.limit.is_some() || params.page_info.is_some() {
        let mut query = url.query_pairs_mut();
        if let Some(limit) = &params.limit {
            query.append_pair("limit", limit);
        }
        if let Some(page_info) = &params.page_info {
            query.append_pair("page_info", page_info);
        }
    }
    Ok(url)
}
