//! HTTP mapping for service errors.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use dummyserver_core::error::{ClientCode, CounterError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be read at all (size limit, broken stream).
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),
    #[error(transparent)]
    Counter(#[from] CounterError),
}

impl ApiError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            ApiError::Body(r) if r.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ClientCode::PayloadTooLarge
            }
            ApiError::Body(r) if r.status().is_server_error() => ClientCode::Internal,
            ApiError::Body(_) => ClientCode::BadRequest,
            ApiError::Counter(e) => e.client_code(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(r) => r.status(),
            ApiError::Counter(e) => match e.client_code() {
                ClientCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
                ClientCode::BadRequest => StatusCode::BAD_REQUEST,
                ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Counter(e) => e.to_string(),
        };
        let body = Json(json!({
            "error": self.client_code().as_str(),
            "message": message,
        }));
        (self.status(), body).into_response()
    }
}
