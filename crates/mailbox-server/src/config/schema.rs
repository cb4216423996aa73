use std::net::SocketAddr;

use mailbox_core::error::{MailboxError, Result};
use reqwest::Url;
use serde::Deserialize;

pub const ENV_BACKEND_URL: &str = "PUBLIC_SUPABASE_URL";
pub const ENV_BACKEND_ANON_KEY: &str = "PUBLIC_SUPABASE_ANON_KEY";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailboxConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub backend: BackendSection,
}

impl MailboxConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MailboxError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.backend.validate()?;

        Ok(())
    }

    /// Apply `PUBLIC_SUPABASE_*` overrides from `lookup` (normally the process env).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend.url = url;
        }
        if let Some(key) = lookup(ENV_BACKEND_ANON_KEY) {
            self.backend.anon_key = key;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MailboxError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    #[serde(default = "default_mail_table")]
    pub mail_table: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            session_cookie: default_session_cookie(),
            mail_table: default_mail_table(),
        }
    }
}

impl BackendSection {
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.anon_key.trim().is_empty() {
            return Err(MailboxError::BadRequest(
                "backend.anon_key must not be empty".into(),
            ));
        }
        if !is_cookie_name(&self.session_cookie) {
            return Err(MailboxError::BadRequest(format!(
                "backend.session_cookie is not a valid cookie name: {:?}",
                self.session_cookie
            )));
        }
        if self.mail_table.is_empty()
            || !self
                .mail_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(MailboxError::BadRequest(format!(
                "backend.mail_table must match [A-Za-z0-9_]+: {:?}",
                self.mail_table
            )));
        }
        Ok(())
    }

    /// Parsed backend root. Only absolute http(s) URLs are accepted.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.url.trim()).map_err(|e| {
            MailboxError::BadRequest(format!("backend.url is not a valid URL: {e}"))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(MailboxError::BadRequest(format!(
                "backend.url must use http or https, got {other}"
            ))),
        }
    }
}

fn default_session_cookie() -> String {
    "sb-access-token".into()
}
fn default_mail_table() -> String {
    "mail".into()
}

// RFC 6265 token: visible ASCII minus separators.
fn is_cookie_name(name: &str) -> bool {
    const SEPARATORS: &[char] = &[
        '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', '{', '}',
    ];
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(&c))
}
