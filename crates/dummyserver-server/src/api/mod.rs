//! Counter routes: `/`, `GET|POST /number`, `GET /log`.

pub mod body;
pub mod error;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use dummyserver_core::Operation;

use crate::app_state::AppState;
use crate::obs::CounterEvent;

pub use body::NumberOperation;
pub use error::ApiError;

pub const ROOT_MESSAGE: &str = "Hello from Dummy Server! Try GET/POST /number or GET /log";

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberResponse {
    pub number: i64,
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    state.emit(CounterEvent::RootCalled);
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

pub async fn get_number(State(state): State<AppState>) -> Json<NumberResponse> {
    Json(NumberResponse {
        number: state.number().await,
    })
}

pub async fn modify_number(
    State(state): State<AppState>,
    headers: HeaderMap,
    raw: Result<Bytes, BytesRejection>,
) -> Result<Json<NumberResponse>, ApiError> {
    let decoded = raw
        .map_err(ApiError::from)
        .and_then(|bytes| body::decode_operation(&headers, &bytes).map_err(ApiError::from));
    let op = decoded.map_err(|e| {
        let reason = e.client_code().as_str().to_ascii_lowercase();
        state
            .metrics()
            .operations_rejected
            .inc(&[("reason", reason.as_str())]);
        tracing::debug!(error = %e, "rejected operation");
        e
    })?;

    let number = state.modify(op.action, op.value).await;
    Ok(Json(NumberResponse { number }))
}

pub async fn get_log(State(state): State<AppState>) -> Json<Vec<Operation>> {
    Json(state.history().await)
}
