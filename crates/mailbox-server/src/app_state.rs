//! Shared application state for the mailbox server.
//!
//! Holds the validated config, the mail page (with its backend handles) and
//! metrics. Cloning is cheap; everything sits behind `Arc`.

use std::sync::Arc;

use mailbox_core::error::Result;

use crate::backend::{IdentityProvider, SupabaseClient, TableStore};
use crate::config::MailboxConfig;
use crate::obs::MailboxMetrics;
use crate::page::MailPage;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: MailboxConfig,
    page: MailPage,
    metrics: Arc<MailboxMetrics>,
}

impl AppState {
    /// Build state backed by a Supabase client for both identity and rows.
    /// Returns Result so main can report startup errors.
    pub fn new(cfg: MailboxConfig) -> Result<Self> {
        let client = Arc::new(SupabaseClient::from_config(&cfg.backend)?);
        tracing::info!(backend = %cfg.backend.url, table = %cfg.backend.mail_table, "backend client ready");
        Ok(Self::with_backend(cfg, client.clone(), client))
    }

    /// Build state around arbitrary backend implementations.
    pub fn with_backend(
        cfg: MailboxConfig,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn TableStore>,
    ) -> Self {
        let metrics = Arc::new(MailboxMetrics::default());
        let page = MailPage::new(identity, store, &cfg.backend, Arc::clone(&metrics));
        Self {
            inner: Arc::new(AppStateInner { cfg, page, metrics }),
        }
    }

    pub fn cfg(&self) -> &MailboxConfig {
        &self.inner.cfg
    }

    pub fn page(&self) -> &MailPage {
        &self.inner.page
    }

    pub fn metrics(&self) -> &MailboxMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
