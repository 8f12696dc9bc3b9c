//! Axum router wiring.

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/number", get(api::get_number).post(api::modify_number))
        .route("/log", get(api::get_log))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route("/openapi.json", get(ops::openapi_json))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ops::track_requests,
        ))
        .with_state(state)
}
