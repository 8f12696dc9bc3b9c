//! dummyserver core: the counter domain model and the shared error surface.
//!
//! This crate holds the counter value, its append-only operation history and
//! the closed set of accepted verbs. It carries no transport or runtime
//! dependencies; the HTTP layer lives in `dummyserver-server`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Fallible paths
//! surface as `CounterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;

pub use counter::{ActionKind, Counter, HistoryAction, Operation};
/// Shared result type.
pub use error::{CounterError, Result};
