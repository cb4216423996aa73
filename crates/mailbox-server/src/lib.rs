//! mailbox server library entry.
//!
//! Wires config, the backend client, the mail page loader, metrics and the
//! HTTP router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod backend;
pub mod config;
pub mod obs;
pub mod ops;
pub mod page;
pub mod router;
