//! External backend seams.
//!
//! The page loader only talks to these traits. `SupabaseClient` implements
//! both over HTTP; tests plug in fakes.

pub mod supabase;

use async_trait::async_trait;

use mailbox_core::error::Result;
use mailbox_core::model::{MailRecord, QueryError, SessionToken, UserIdentity};

pub use supabase::SupabaseClient;

/// Resolves a session token to a user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the provider rejects the token. `Err` only when the
    /// provider could not be reached.
    async fn get_user(&self, token: &SessionToken) -> Result<Option<UserIdentity>>;
}

/// Reads rows from a hosted table. Row visibility is the store's concern.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select_all(&self, table: &str) -> std::result::Result<Vec<MailRecord>, QueryError>;
}
