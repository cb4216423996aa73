//! mailbox core: transport-agnostic page types and the shared error surface.
//!
//! This crate defines the data contracts between the page loader, the backend
//! client and the HTTP layer. It carries no transport or runtime dependencies
//! so it can be reused by tests and tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MailboxError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{MailboxError, Result};
pub use model::{MailRecord, PageData, QueryError, SessionToken, UserIdentity};
