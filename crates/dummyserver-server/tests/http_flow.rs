//! End-to-end route behavior driven in-process through the axum router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};

use common::{fixed, get, get_json, post_json, post_raw, send, RecordingSink};
use dummyserver_core::ActionKind;
use dummyserver_server::{
    api::ROOT_MESSAGE,
    app_state::AppState,
    config::ServerConfig,
    obs::CounterEvent,
    router,
};

#[tokio::test]
async fn root_names_the_other_routes() {
    let (_, app, sink) = fixed(42);
    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": ROOT_MESSAGE }));
    let msg = body["message"].as_str().unwrap();
    assert!(msg.contains("/number") && msg.contains("/log"));
    assert_eq!(sink.events(), vec![CounterEvent::RootCalled]);
}

#[tokio::test]
async fn startup_value_is_visible_in_number_and_log() {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::start(&ServerConfig::default(), sink.clone()).unwrap();
    let app = router::build_router(state);

    let (_, number) = get_json(&app, "/number").await;
    let n = number["number"].as_i64().unwrap();
    assert!((1..=100).contains(&n));

    let (status, log) = get_json(&app, "/log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log, json!([{ "action": "initialize", "value": n }]));

    let events = sink.events();
    assert_eq!(events[0], CounterEvent::Starting);
    assert_eq!(events[1], CounterEvent::Initialized { number: n });
}

#[tokio::test]
async fn configured_initial_value_is_used() {
    let mut cfg = ServerConfig::default();
    cfg.counter.initial_value = Some(-7);
    let state = AppState::start(&cfg, Arc::new(RecordingSink::default())).unwrap();
    let app = router::build_router(state);

    let (_, number) = get_json(&app, "/number").await;
    assert_eq!(number, json!({ "number": -7 }));
}

#[tokio::test]
async fn add_then_subtract_flow() {
    let (_, app, _) = fixed(42);

    let (status, body) = get_json(&app, "/number").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "number": 42 }));

    let (status, body) = post_json(&app, "/number", json!({ "action": "add", "value": 15 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "number": 57 }));

    let (status, body) =
        post_json(&app, "/number", json!({ "action": "subtract", "value": 7 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "number": 50 }));

    let (_, body) = get_json(&app, "/number").await;
    assert_eq!(body, json!({ "number": 50 }));
}

#[tokio::test]
async fn log_records_operations_and_ignores_rejections() {
    let (_, app, _) = fixed(42);

    let (_, log) = get_json(&app, "/log").await;
    assert_eq!(log, json!([{ "action": "initialize", "value": 42 }]));

    post_json(&app, "/number", json!({ "action": "add", "value": 10 })).await;
    post_json(&app, "/number", json!({ "action": "subtract", "value": 5 })).await;

    let expected = json!([
        { "action": "initialize", "value": 42 },
        { "action": "add", "value": 10 },
        { "action": "subtract", "value": 5 },
    ]);
    let (_, log) = get_json(&app, "/log").await;
    assert_eq!(log, expected);

    let (status, body) =
        post_json(&app, "/number", json!({ "action": "multiply", "value": 3 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");

    let (_, log) = get_json(&app, "/log").await;
    assert_eq!(log, expected);
}

#[tokio::test]
async fn invalid_bodies_are_422_and_leave_state_untouched() {
    let (state, app, sink) = fixed(42);
    let before = state.snapshot().await;

    let bad_bodies = [
        r#"{"action":"multiply","value":3}"#,
        r#"{"action":"Add","value":3}"#,
        r#"{"action":"initialize","value":3}"#,
        r#"{"action":"add","value":"abc"}"#,
        r#"{"action":"add","value":"3.5"}"#,
        r#"{"action":"add","value":3.5}"#,
        r#"{"action":"add","value":null}"#,
        r#"{"action":"add","value":true}"#,
        r#"{"action":"add"}"#,
        r#"{"value":3}"#,
        r#"{}"#,
        r#"[1,2]"#,
        r#"{"action":"add","value":3"#,
        r#"not json"#,
    ];
    for body in bad_bodies {
        let (status, text) = post_raw(&app, "/number", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["error"], "VALIDATION_FAILED", "body: {body}");
    }

    let plain_text = Request::builder()
        .method("POST")
        .uri("/number")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"action":"add","value":3}"#))
        .unwrap();
    let (status, _) = send(&app, plain_text).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(state.snapshot().await, before);
    assert!(sink.events().is_empty());
    assert_eq!(
        state.metrics().operations_rejected.get(&[("reason", "validation_failed")]),
        bad_bodies.len() as u64 + 1
    );
}

#[tokio::test]
async fn missing_content_type_is_read_as_json() {
    let (_, app, _) = fixed(42);
    let req = Request::builder()
        .method("POST")
        .uri("/number")
        .body(Body::from(r#"{"action":"add","value":3}"#))
        .unwrap();
    let (status, text) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), json!({ "number": 45 }));
}

#[tokio::test]
async fn integral_strings_and_floats_are_accepted() {
    let (_, app, _) = fixed(42);

    let (status, body) = post_raw(&app, "/number", r#"{"action":"add","value":"3"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "number": 45 }));

    let (status, body) = post_raw(&app, "/number", r#"{"action":"subtract","value":3.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "number": 42 }));

    let (_, log) = get_json(&app, "/log").await;
    assert_eq!(
        log,
        json!([
            { "action": "initialize", "value": 42 },
            { "action": "add", "value": 3 },
            { "action": "subtract", "value": 3 },
        ])
    );
}

#[tokio::test]
async fn oversized_body_is_413() {
    let (state, app, sink) = fixed(42);
    let huge = format!(
        r#"{{"action":"add","value":1,"pad":"{}"}}"#,
        "x".repeat(3 * 1024 * 1024)
    );
    let (status, text) = post_raw(&app, "/number", &huge).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["error"], "PAYLOAD_TOO_LARGE");

    assert_eq!(state.snapshot().await, (42, 1));
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn unknown_fields_are_ignored() {
    let (_, app, _) = fixed(1);
    let (status, body) = post_json(
        &app,
        "/number",
        json!({ "action": "add", "value": 2, "note": "extra" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "number": 3 }));
}

#[tokio::test]
async fn reads_are_idempotent() {
    let (_, app, _) = fixed(42);
    post_json(&app, "/number", json!({ "action": "add", "value": 1 })).await;

    let first = (get(&app, "/number").await, get(&app, "/log").await);
    let second = (get(&app, "/number").await, get(&app, "/log").await);
    assert_eq!(first, second);
}

#[tokio::test]
async fn modify_emits_received_before_updated() {
    let (_, app, sink) = fixed(42);
    post_json(&app, "/number", json!({ "action": "add", "value": 15 })).await;
    get_json(&app, "/log").await;

    assert_eq!(
        sink.events(),
        vec![
            CounterEvent::OperationReceived {
                action: ActionKind::Add,
                value: 15,
                current: 42
            },
            CounterEvent::NumberUpdated {
                new_number: 57,
                action: ActionKind::Add,
                value: 15
            },
            CounterEvent::LogReturned { count: 2 },
        ]
    );
}

#[tokio::test]
async fn negative_and_large_values_use_signed_64_bit_math() {
    let (_, app, _) = fixed(0);
    let (_, body) = post_json(&app, "/number", json!({ "action": "subtract", "value": -5 })).await;
    assert_eq!(body, json!({ "number": 5 }));
    let (_, body) = post_json(
        &app,
        "/number",
        json!({ "action": "add", "value": 9_000_000_000_i64 }),
    )
    .await;
    assert_eq!(body, json!({ "number": 9_000_000_005_i64 }));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (_, app, _) = fixed(42);
    let (status, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
