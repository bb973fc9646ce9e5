//! Request-level errors and their HTTP mapping.

use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::{Route, RouteError};
use crate::upstream::UpstreamError;

/// Everything that can stop a request before a response is relayed.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Dispatch rejected the method or path.
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Failed to read request body")]
    UnreadableBody,

    #[error("Request body is required")]
    MissingBody,

    /// The upstream call failed below the HTTP level.
    #[error("{}", failure_message(.operation))]
    Upstream {
        operation: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ProxyError {
    pub fn upstream(route: &Route, source: UpstreamError) -> Self {
        Self::Upstream {
            operation: route.operation(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Route(RouteError::NotFound) => StatusCode::NOT_FOUND,
            ProxyError::Route(RouteError::MethodNotAllowed { .. }) => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            ProxyError::Route(RouteError::Id(_))
            | ProxyError::UnreadableBody
            | ProxyError::MissingBody => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn failure_message(operation: &str) -> &'static str {
    match operation {
        "list" => "Failed to fetch webhooks",
        "create" => "Failed to create webhook",
        "update" => "Failed to update webhook",
        "delete" => "Failed to delete webhook",
        _ => "Upstream request failed",
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), self.to_string()).into_response();
        if let ProxyError::Route(RouteError::MethodNotAllowed { allowed }) = &self {
            let allow = allowed
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(ALLOW, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{IdError, WebhookId};
    use crate::routing::router::ITEM_METHODS;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProxyError::from(RouteError::Id(IdError::Missing)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::from(RouteError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ProxyError::MissingBody.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_allowed_sets_allow() {
        let response = ProxyError::from(RouteError::MethodNotAllowed {
            allowed: ITEM_METHODS,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "PUT, DELETE");
    }

    #[test]
    fn test_upstream_messages() {
        let id = WebhookId::parse("1").unwrap();
        let err = ProxyError::upstream(&Route::Delete(id), UpstreamError::InvalidCredential);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to delete webhook");

        let err = ProxyError::upstream(&Route::List, UpstreamError::InvalidCredential);
        assert_eq!(err.to_string(), "Failed to fetch webhooks");
    }
}
