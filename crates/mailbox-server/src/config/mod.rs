//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use mailbox_core::error::{MailboxError, Result};

pub use schema::{BackendSection, MailboxConfig, ServerSection};

/// Config path used when `MAILBOX_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "mailbox.yaml";

pub fn load_from_str(s: &str) -> Result<MailboxConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read `path`; backend url/key may be overridden from the process env.
pub fn load_with_env(path: &str) -> Result<MailboxConfig> {
    let s = read(path)?;
    load_from_str_with(&s, |k| std::env::var(k).ok())
}

/// Parse, apply overrides from `lookup`, then validate.
pub fn load_from_str_with<F>(s: &str, lookup: F) -> Result<MailboxConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = parse(s)?;
    cfg.apply_env(lookup);
    cfg.validate()?;
    Ok(cfg)
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| MailboxError::Internal(format!("read config failed ({path}): {e}")))
}

fn parse(s: &str) -> Result<MailboxConfig> {
    serde_yaml::from_str(s).map_err(|e| MailboxError::BadRequest(format!("invalid yaml: {e}")))
}
