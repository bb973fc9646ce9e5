//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Map (method, path) to exactly one webhook route
//! - Reject disallowed methods before looking at the id
//! - Return a typed route or an explicit client error
//!
//! # Design Decisions
//! - Pure function of its inputs (thread-safe without locks)
//! - Explicit errors rather than silent defaults
//! - Update and delete are both accepted on the item path

use axum::http::Method;
use thiserror::Error;

use crate::routing::matcher::{match_path, IdError, PathMatch, WebhookId};

/// Methods accepted on `/api/webhooks`.
pub const COLLECTION_METHODS: &[Method] = &[Method::GET, Method::POST];

/// Methods accepted on `/api/webhooks/{id}`.
pub const ITEM_METHODS: &[Method] = &[Method::PUT, Method::DELETE];

/// A dispatched webhook route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Update(WebhookId),
    Delete(WebhookId),
}

impl Route {
    /// Short operation name used in logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Route::List => "list",
            Route::Create => "create",
            Route::Update(_) => "update",
            Route::Delete(_) => "delete",
        }
    }
}

/// Dispatch failures. None of these reach upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed { allowed: &'static [Method] },

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Resolve a request method and path to a [`Route`].
pub fn resolve(method: &Method, path: &str) -> Result<Route, RouteError> {
    match match_path(path).ok_or(RouteError::NotFound)? {
        PathMatch::Collection => match *method {
            Method::GET => Ok(Route::List),
            Method::POST => Ok(Route::Create),
            _ => Err(RouteError::MethodNotAllowed {
                allowed: COLLECTION_METHODS,
            }),
        },
        PathMatch::Item(raw) => {
            if !ITEM_METHODS.contains(method) {
                return Err(RouteError::MethodNotAllowed {
                    allowed: ITEM_METHODS,
                });
            }
            let id = WebhookId::parse(raw)?;
            if *method == Method::PUT {
                Ok(Route::Update(id))
            } else {
                Ok(Route::Delete(id))
            }
        }
    }
}
