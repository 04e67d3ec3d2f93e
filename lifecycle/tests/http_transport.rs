//! `HttpTransport` against a stub server speaking the catalog envelope.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

mod common;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, put},
};
use common::{Book, BookPatch, draft};
use composable_crud_lifecycle::{HttpTransport, Transport, TransportError};
use serde_json::{Value, json};

async fn list() -> Json<Value> {
    Json(json!({
        "success": true,
        "count": 2,
        "data": [
            {"id": 1, "title": "Middlemarch", "author": "George Eliot"},
            {"id": 2, "title": "Beloved", "author": "Toni Morrison"}
        ]
    }))
}

async fn reject_create() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": ["Title is required", "Author is required"]})),
    )
}

async fn update(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 1 {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {"id": 1, "title": "Middlemarch", "author": "Mary Ann Evans"}
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "Book not found"})),
        )
    }
}

async fn broken_delete() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": "Server error"})),
    )
}

async fn stub_server() -> String {
    let app = Router::new()
        .route("/api/books", get(list).post(reject_create))
        .route("/api/books/:id", put(update).delete(broken_delete));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

#[tokio::test]
async fn list_unwraps_envelope() {
    let transport = HttpTransport::<Book>::new(&stub_server().await);

    let books = transport.list().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[1].author, "Toni Morrison");
}

#[tokio::test]
async fn bad_request_maps_to_validation_messages() {
    let transport = HttpTransport::<Book>::new(&stub_server().await);

    let error = transport.create(draft("")).await.unwrap_err();

    assert_eq!(
        error,
        TransportError::Validation(vec![
            "Title is required".to_string(),
            "Author is required".to_string(),
        ])
    );
}

#[tokio::test]
async fn update_returns_server_representation() {
    let transport = HttpTransport::<Book>::new(&stub_server().await);

    let book = transport
        .update(
            1,
            BookPatch {
                author: Some("Mary Ann Evans".to_string()),
                ..BookPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(book.author, "Mary Ann Evans");
}

#[tokio::test]
async fn not_found_keeps_server_message() {
    let transport = HttpTransport::<Book>::new(&stub_server().await);

    let error = transport.update(999, BookPatch::default()).await.unwrap_err();

    assert_eq!(error, TransportError::NotFound("Book not found".to_string()));
}

#[tokio::test]
async fn server_error_maps_to_transport() {
    let transport = HttpTransport::<Book>::new(&stub_server().await);

    let error = transport.delete(1).await.unwrap_err();

    assert_eq!(error, TransportError::Transport("Server error".to_string()));
}

#[tokio::test]
async fn unreachable_server_is_a_generic_transport_failure() {
    // Bind then drop so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::<Book>::new(&format!("http://{addr}/api/"));
    assert_eq!(transport.collection_url(), format!("http://{addr}/api/books"));

    let error = transport.list().await.unwrap_err();

    assert_eq!(
        error,
        TransportError::Transport("Failed to fetch books".to_string())
    );
}
