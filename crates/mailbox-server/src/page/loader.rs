//! Mail page loader.
//!
//! Three sequential steps, each short-circuiting the next:
//! 1. session cookie present?
//! 2. token resolves to a user?
//! 3. table query outcome.
//!
//! Every outcome is data (`PageData`), never an error.

use std::sync::Arc;
use std::time::Instant;

use cookie::CookieJar;
use tracing::Instrument;

use mailbox_core::model::PageData;

use crate::backend::{IdentityProvider, TableStore};
use crate::config::BackendSection;
use crate::obs::MailboxMetrics;
use crate::page::cookies::session_token;

/// How a page load ended; used as the `outcome` metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    NotLoggedIn,
    InvalidSession,
    QueryFailed,
    Loaded,
}

impl LoadOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadOutcome::NotLoggedIn => "not_logged_in",
            LoadOutcome::InvalidSession => "invalid_session",
            LoadOutcome::QueryFailed => "query_failed",
            LoadOutcome::Loaded => "loaded",
        }
    }
}

pub struct MailPage {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn TableStore>,
    session_cookie: String,
    table: String,
    metrics: Arc<MailboxMetrics>,
}

impl MailPage {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn TableStore>,
        cfg: &BackendSection,
        metrics: Arc<MailboxMetrics>,
    ) -> Self {
        Self {
            identity,
            store,
            session_cookie: cfg.session_cookie.clone(),
            table: cfg.mail_table.clone(),
            metrics,
        }
    }

    pub async fn load(&self, jar: &CookieJar) -> PageData {
        let span = tracing::info_span!("page_load", table = %self.table);

        let in_flight = self.metrics.page_loads_in_flight.track();
        let (outcome, page) = self.run(jar).instrument(span).await;
        drop(in_flight);

        self.metrics.page_loads.inc(&[("outcome", outcome.as_str())]);
        page
    }

    async fn run(&self, jar: &CookieJar) -> (LoadOutcome, PageData) {
        let Some(token) = session_token(jar, &self.session_cookie) else {
            tracing::debug!(cookie = %self.session_cookie, "no session cookie");
            return (LoadOutcome::NotLoggedIn, PageData::not_logged_in());
        };

        let started = Instant::now();
        let user = self.identity.get_user(&token).await;
        self.metrics
            .backend_duration
            .observe(&[("call", "get_user")], started.elapsed());

        let user = match user {
            Ok(Some(user)) => {
                self.metrics.backend_calls.inc(&[("call", "get_user"), ("result", "ok")]);
                user
            }
            Ok(None) => {
                self.metrics.backend_calls.inc(&[("call", "get_user"), ("result", "rejected")]);
                tracing::debug!("session rejected by identity provider");
                return (LoadOutcome::InvalidSession, PageData::invalid_session());
            }
            Err(e) => {
                self.metrics.backend_calls.inc(&[("call", "get_user"), ("result", "error")]);
                tracing::warn!(error = %e, "identity provider unreachable");
                return (LoadOutcome::InvalidSession, PageData::invalid_session());
            }
        };

        let started = Instant::now();
        let rows = self.store.select_all(&self.table).await;
        self.metrics
            .backend_duration
            .observe(&[("call", "select")], started.elapsed());

        match rows {
            Ok(rows) => {
                self.metrics.backend_calls.inc(&[("call", "select"), ("result", "ok")]);
                tracing::debug!(user = %user.log_id(), rows = rows.len(), "mail loaded");
                (LoadOutcome::Loaded, PageData::loaded(rows))
            }
            Err(err) => {
                self.metrics.backend_calls.inc(&[("call", "select"), ("result", "error")]);
                tracing::error!(
                    table = %self.table,
                    user = %user.log_id(),
                    code = err.code.as_deref().unwrap_or("-"),
                    error = %err,
                    "error fetching mail"
                );
                (LoadOutcome::QueryFailed, PageData::failed(err.message))
            }
        }
    }
}
