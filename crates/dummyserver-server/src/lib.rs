//! dummyserver HTTP service library.
//!
//! Wires the counter state, the JSON routes, operational endpoints and
//! observability into one axum application. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod obs;
pub mod openapi;
pub mod ops;
pub mod router;
