//! End-to-end HTTP tests for the items API
//!
//! Drives the full router with in-memory requests via tower's oneshot.

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use items_server::{create_router, Database};

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    create_router(db, 30)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = app();

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Welcome to DevOps Items API"})
    );
}

#[tokio::test]
async fn hello_returns_fixed_string() {
    let app = app();

    let response = send(&app, "GET", "/hello", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!("Hello, World!"));
}

#[tokio::test]
async fn full_item_lifecycle() {
    let app = app();

    // Create
    let response = send(&app, "POST", "/items", Some(json!({"text": "Docker container"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "text": "Docker container"})
    );

    // List
    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"id": 1, "text": "Docker container"}])
    );

    // Update
    let response = send(&app, "PUT", "/items/1", Some(json!({"text": "Docker Swarm"}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "text": "Docker Swarm"})
    );

    // Delete
    let response = send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    // List is empty again
    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn list_preserves_creation_order() {
    let app = app();

    for text in ["Kubernetes", "Terraform", "Ansible"] {
        let response = send(&app, "POST", "/items", Some(json!({"text": text}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(
        json_body(response).await,
        json!([
            {"id": 1, "text": "Kubernetes"},
            {"id": 2, "text": "Terraform"},
            {"id": 3, "text": "Ansible"}
        ])
    );
}

#[tokio::test]
async fn update_missing_item_returns_404() {
    let app = app();

    let response = send(&app, "PUT", "/items/999", Some(json!({"text": "CI/CD"}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn delete_missing_item_returns_404() {
    let app = app();

    let response = send(&app, "DELETE", "/items/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn create_with_empty_text_is_rejected() {
    let app = app();

    let response = send(&app, "POST", "/items", Some(json!({"text": ""}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "text cannot be empty"})
    );

    // No row persisted
    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn create_with_missing_text_is_rejected() {
    let app = app();

    let response = send(&app, "POST", "/items", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body.get("detail").is_some());
}

#[tokio::test]
async fn update_with_empty_text_is_rejected() {
    let app = app();

    let response = send(&app, "POST", "/items", Some(json!({"text": "Jenkins"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "PUT", "/items/1", Some(json!({"text": ""}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Text unchanged
    let response = send(&app, "GET", "/items", None).await;
    assert_eq!(
        json_body(response).await,
        json!([{"id": 1, "text": "Jenkins"}])
    );
}

#[tokio::test]
async fn deleted_id_is_not_reassigned() {
    let app = app();

    let response = send(&app, "POST", "/items", Some(json!({"text": "GitLab"}))).await;
    assert_eq!(json_body(response).await, json!({"id": 1, "text": "GitLab"}));

    let response = send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "POST", "/items", Some(json!({"text": "GitHub"}))).await;
    assert_eq!(json_body(response).await, json!({"id": 2, "text": "GitHub"}));
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin() {
    let app = app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/items")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}
