#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use dummyserver_core::Counter;
use dummyserver_server::{
    app_state::AppState,
    obs::{CounterEvent, EventSink},
    router,
};

/// Keeps every emitted event in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CounterEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<CounterEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &CounterEvent) {
        self.events.lock().unwrap().push(*event);
    }
}

pub fn fixed(initial: i64) -> (AppState, Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(Counter::new(initial), sink.clone());
    let app = router::build_router(state.clone());
    (state, app, sink)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, text) = post_raw(app, uri, &body.to_string()).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, text) = get(app, uri).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
