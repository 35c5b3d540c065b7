// tests/api_tests.rs

mod common;

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::IntoResponse,
};
use common::{MemoryStore, seeded_store, use_case};
use forum_backend::{
    error::{AppError, ForumError},
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(store: Arc<MemoryStore>) -> String {
    // 1. Build the router around an in-memory store
    let app = routes::create_router(AppState::new(use_case(&store)));

    // 2. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 3. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn unknown_route_is_404() {
    // Arrange
    let address = spawn_app(seeded_store()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn thread_detail_returns_nested_payload() {
    // Arrange
    let address = spawn_app(seeded_store()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/threads/thread-123", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let thread = &body["data"]["thread"];
    assert_eq!(thread["id"], "thread-123");
    assert_eq!(thread["title"], "a thread");
    assert_eq!(thread["body"], "a body");
    assert_eq!(thread["username"], "dicoding");
    assert!(thread["date"].is_string());

    let comments = thread["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0]["id"], "comment-xyz");
    assert_eq!(comments[0]["content"], "**komentar telah dihapus**");
    assert_eq!(comments[0]["replies"], serde_json::json!([]));
    assert_eq!(comments[1]["id"], "comment-def");
    assert_eq!(comments[1]["replies"][1]["content"], "**balasan telah dihapus**");
    assert_eq!(comments[2]["likeCount"], 2);
}

#[tokio::test]
async fn missing_thread_returns_404_with_error_body() {
    // Arrange
    let address = spawn_app(seeded_store()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/threads/thread-unknown", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Thread not found");
}

#[tokio::test]
async fn store_failure_is_an_opaque_500() {
    let store = seeded_store();
    store.fail_reply_fetch();
    let app = routes::create_router(AppState::new(use_case(&store)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/threads/thread-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn ownership_failures_are_403_with_their_message() {
    let err = ForumError::Forbidden("You are not authorized to delete this comment".to_string());

    let response = AppError::from(err).into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "You are not authorized to delete this comment");
}
