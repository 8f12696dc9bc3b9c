//! Top-level facade crate for dummyserver.
//!
//! Re-exports the counter model and the HTTP service so users can depend on a single crate.

pub mod core {
    pub use dummyserver_core::*;
}

pub mod server {
    pub use dummyserver_server::*;
}
