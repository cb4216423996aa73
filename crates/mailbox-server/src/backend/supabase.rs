//! Supabase-compatible HTTP client (GoTrue auth + PostgREST).
//!
//! - `GET {url}/auth/v1/user` with the user's bearer token resolves identity.
//! - `GET {url}/rest/v1/{table}?select=*` with the anon key reads rows.
//!
//! One client is built at startup and shared; it holds no mutable state.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use mailbox_core::error::{MailboxError, Result};
use mailbox_core::model::{MailRecord, QueryError, SessionToken, UserIdentity};

use super::{IdentityProvider, TableStore};
use crate::config::BackendSection;

#[derive(Clone)]
pub struct SupabaseClient {
    base: Url,
    anon_key: String,
    http: Client,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    pub fn new(base: Url, anon_key: impl Into<String>) -> Result<Self> {
        let anon_key = anon_key.into();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&anon_key)?);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| MailboxError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            base: with_trailing_slash(base),
            anon_key,
            http,
        })
    }

    pub fn from_config(cfg: &BackendSection) -> Result<Self> {
        Self::new(cfg.base_url()?, cfg.anon_key.trim())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| MailboxError::Internal(format!("bad backend path {path}: {e}")))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn get_user(&self, token: &SessionToken) -> Result<Option<UserIdentity>> {
        let url = self.endpoint("auth/v1/user")?;
        let Ok(auth) = bearer(token.as_str()) else {
            return Ok(None);
        };
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| MailboxError::Backend(format!("auth request failed: {e}")))?;

        if !resp.status().is_success() {
            tracing::debug!(status = %resp.status(), "auth provider rejected session");
            return Ok(None);
        }

        match resp.json::<UserIdentity>().await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::debug!(error = %e, "auth provider returned an undecodable user");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn select_all(&self, table: &str) -> std::result::Result<Vec<MailRecord>, QueryError> {
        let mut url = self
            .endpoint(&format!("rest/v1/{table}"))
            .map_err(|e| QueryError::new(e.to_string()))?;
        url.query_pairs_mut().append_pair("select", "*");

        let auth = bearer(&self.anon_key).map_err(|e| QueryError::new(e.to_string()))?;
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, auth)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| QueryError::new(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| QueryError::new(e.to_string()))?;

        if !status.is_success() {
            return Err(query_error_from_body(status, &body));
        }

        let rows: Option<Vec<Value>> =
            serde_json::from_str(&body).map_err(|e| QueryError::new(e.to_string()))?;
        Ok(rows.unwrap_or_default())
    }
}

/// PostgREST error body, else the raw text, else the status line.
fn query_error_from_body(status: StatusCode, body: &str) -> QueryError {
    if let Ok(err) = serde_json::from_str::<QueryError>(body) {
        return err;
    }
    let text = body.trim();
    if text.is_empty() {
        QueryError::new(status.to_string())
    } else {
        QueryError::new(text)
    }
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut v = header_value(&format!("Bearer {token}"))?;
    v.set_sensitive(true);
    Ok(v)
}

fn header_value(s: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(s)
        .map_err(|_| MailboxError::BadRequest("credential contains invalid header characters".into()))
}

// Url::join drops the last segment without it (https://x/base + a => https://x/a).
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
