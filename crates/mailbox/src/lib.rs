//! Top-level facade crate for mailbox.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use mailbox_core::*;
}

pub mod server {
    pub use mailbox_server::*;
}
