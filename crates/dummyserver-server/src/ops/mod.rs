//! Operational HTTP endpoints.
//!
//! - `/healthz`      : liveness
//! - `/readyz`       : readiness (503 when draining)
//! - `/metrics`      : Prometheus text format
//! - `/openapi.json` : API description

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::app_state::AppState;
use crate::openapi;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let (value, entries) = state.snapshot().await;
    let body = state.metrics().render(&[
        ("dummyserver_counter_value", value),
        ("dummyserver_history_entries", entries as i64),
    ]);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

pub async fn openapi_json() -> Json<serde_json::Value> {
    Json(openapi::document())
}

/// Count requests per route and status. Installed with `route_layer`, so
/// only matched routes reach it; unrouted 404s are not counted.
pub async fn track_requests(
    State(state): State<AppState>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let route = matched.as_str();

    let resp = next.run(req).await;
    let status = resp.status();
    state.metrics().http_requests.inc(&[
        ("method", method.as_str()),
        ("route", route),
        ("status", status.as_str()),
    ]);
    tracing::debug!(%method, %route, status = status.as_u16(), "request handled");
    resp
}
