//! Shared error type across mailbox crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// External backend could not be reached.
    BackendUnavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MailboxError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MailboxError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("backend unavailable: {0}")]
    Backend(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MailboxError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MailboxError::BadRequest(_) => ClientCode::BadRequest,
            MailboxError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MailboxError::Backend(_) => ClientCode::BackendUnavailable,
            MailboxError::Internal(_) => ClientCode::Internal,
        }
    }
}
