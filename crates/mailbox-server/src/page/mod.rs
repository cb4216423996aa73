//! Session-gated mail page.
//!
//! `cookies` turns request headers into a jar and pulls the session token;
//! `loader` runs the cookie -> identity -> table sequence.

pub mod cookies;
pub mod loader;

pub use loader::{LoadOutcome, MailPage};
