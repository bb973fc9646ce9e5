//! Path matching logic.
//!
//! # Responsibilities
//! - Recognise the webhook collection path and the id-scoped item path
//! - Extract the id segment without interpreting it
//! - Validate ids into a typed [`WebhookId`]
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A trailing slash on the collection is the item path with an empty id
//! - Deeper paths are not webhook routes at all
//! - No regex to guarantee O(n) matching

use std::fmt;

use thiserror::Error;

/// Local path prefix of the webhook API.
pub const WEBHOOKS_PATH: &str = "/api/webhooks";

/// Which webhook path shape a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch<'a> {
    /// `/api/webhooks`
    Collection,
    /// `/api/webhooks/{id}`; the raw segment may be empty.
    Item(&'a str),
}

/// Match a request path against the webhook prefix.
pub fn match_path(path: &str) -> Option<PathMatch<'_>> {
    let rest = path.strip_prefix(WEBHOOKS_PATH)?;
    if rest.is_empty() {
        return Some(PathMatch::Collection);
    }
    let segment = rest.strip_prefix('/')?;
    if segment.contains('/') {
        return None;
    }
    Some(PathMatch::Item(segment))
}

/// Reasons an id segment is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Webhook ID is required")]
    Missing,

    #[error("Webhook ID '{0}' contains invalid characters")]
    Invalid(String),
}

/// A validated webhook identifier: a non-empty run of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebhookId(String);

impl WebhookId {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.is_empty() {
            return Err(IdError::Missing);
        }
        let valid = raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(IdError::Invalid(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
