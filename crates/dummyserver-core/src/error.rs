//! Shared error type across dummyserver crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Request body or config failed schema validation.
    ValidationFailed,
    /// Body could not be read (e.g. aborted stream).
    BadRequest,
    /// Body exceeded the size limit.
    PayloadTooLarge,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::ValidationFailed => "VALIDATION_FAILED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CounterError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            CounterError::Validation(_) => ClientCode::ValidationFailed,
            CounterError::Internal(_) => ClientCode::Internal,
        }
    }
}
