//! API integration tests
//!
//! Drive the full router over the in-memory book store.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshop_server::{
    api,
    config::{AppConfig, StoreBackend},
    repository::Repository,
    AppState,
};

fn app() -> Router {
    let mut config = AppConfig::default();
    config.catalog.store = StoreBackend::Memory;
    api::create_router(AppState::new(config, Repository::in_memory()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/catalog")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");

    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_empty_catalog() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], json!([]));
    assert!(body["selected_id"].is_null());
    assert!(body["feedback"].is_null());
}

#[tokio::test]
async fn test_add_select_update_flow() {
    let app = app();

    let (status, body) = submit(
        &app,
        json!({"action": "add", "name": "Dune", "edition": 1, "price": "12.50"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
    assert_eq!(body["records"][0]["name"], "Dune");
    assert_eq!(body["records"][0]["edition"], 1);
    assert_eq!(body["records"][0]["price"], "12.50");
    assert_eq!(body["feedback"]["kind"], "success");
    assert_eq!(body["feedback"]["text"], "Book \"Dune\" added successfully!");
    let id = body["records"][0]["id"].as_i64().expect("No book ID");

    let (status, body) = get(&app, &format!("/api/v1/catalog?edit={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected_id"], id);
    assert_eq!(body["selected"]["name"], "Dune");

    let (status, body) = submit(
        &app,
        json!({
            "action": "update",
            "selected_id": id,
            "name": "Dune",
            "edition": "2",
            "price": "14.00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["id"], id);
    assert_eq!(body["records"][0]["edition"], 2);
    assert_eq!(body["records"][0]["price"], "14.00");
    assert_eq!(body["feedback"]["kind"], "success");
    assert!(body["selected_id"].is_null());
}

#[tokio::test]
async fn test_invalid_add_reports_field_errors() {
    let app = app();

    let (status, body) = submit(
        &app,
        json!({"action": "add", "name": "   ", "edition": 0, "price": "abc"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], json!([]));
    assert_eq!(body["feedback"]["kind"], "error");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["kind"], "EmptyField");
    assert_eq!(body["errors"][1]["field"], "edition");
    assert_eq!(body["errors"][1]["kind"], "OutOfRange");
    assert_eq!(body["errors"][2]["field"], "price");
    assert_eq!(body["errors"][2]["kind"], "InvalidNumber");
}

#[tokio::test]
async fn test_delete_selected_book_clears_selection() {
    let app = app();

    let (_, body) = submit(
        &app,
        json!({"action": "add", "name": "Emma", "edition": 3, "price": 9.99}),
    )
    .await;
    let id = body["records"][0]["id"].as_i64().unwrap();

    let (status, body) = submit(
        &app,
        json!({"action": "delete", "id": id, "selected_id": id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], json!([]));
    assert!(body["selected_id"].is_null());
    assert_eq!(body["feedback"]["text"], "Book \"Emma\" deleted successfully!");

    let (status, body) = submit(&app, json!({"action": "delete", "id": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"]["kind"], "error");
    assert_eq!(body["feedback"]["text"], format!("Book {} not found.", id));
}

#[tokio::test]
async fn test_cancel_edit() {
    let app = app();

    let (_, body) = submit(
        &app,
        json!({"action": "add", "name": "Dune", "edition": 1, "price": "12.50"}),
    )
    .await;
    let id = body["records"][0]["id"].as_i64().unwrap();

    let (status, body) = submit(&app, json!({"action": "cancel-edit", "selected_id": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["selected_id"].is_null());
    assert!(body["feedback"].is_null());
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let app = app();

    let (status, body) = submit(&app, json!({"action": "delete"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["code"], 4);
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let app = app();

    let (status, _) = submit(&app, json!({"action": "search", "name": "Dune"})).await;
    assert!(status.is_client_error());
}
