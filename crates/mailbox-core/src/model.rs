//! Page data contracts.
//!
//! Everything the backend hands back is treated as opaque: identities are only
//! checked for presence and mail rows are passed through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error string returned when the request carries no session cookie.
pub const NOT_LOGGED_IN: &str = "Not logged in";

/// Error string returned when the identity provider rejects the session.
pub const INVALID_SESSION: &str = "Invalid session";

/// A single row from the mail table. No local schema is enforced.
pub type MailRecord = Value;

/// Opaque bearer token read from the session cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a cookie value. Empty values carry no session.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// User record as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl UserIdentity {
    /// Identifier for log context; `"-"` when the provider omits it.
    pub fn log_id(&self) -> &str {
        self.id.as_deref().unwrap_or("-")
    }
}

/// Failure reported by the table store (PostgREST error body shape).
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
        }
    }
}

/// Result of a page load, consumed by the rendering layer.
///
/// Serializes as `{ "mail": [...] }` or `{ "mail": [], "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub mail: Vec<MailRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageData {
    pub fn loaded(mail: Vec<MailRecord>) -> Self {
        Self { mail, error: None }
    }

    /// Empty mail list plus a human-readable error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            mail: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn not_logged_in() -> Self {
        Self::failed(NOT_LOGGED_IN)
    }

    pub fn invalid_session() -> Self {
        Self::failed(INVALID_SESSION)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
