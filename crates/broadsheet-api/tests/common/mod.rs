//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use broadsheet_api::state::AppState;
use broadsheet_core::blob::BlobStore;
use broadsheet_core::clock::Clock;
use broadsheet_core::repository::DocumentRepository;
use broadsheet_memory_store::{InMemoryBlobStore, InMemoryDocumentRepository};
use broadsheet_test_support::FixedClock;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Base URL of uploaded media in tests.
pub const MEDIA_BASE_URL: &str = "https://cdn.example/media";

const BOUNDARY: &str = "broadsheet-test-boundary";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over fresh in-memory stores and a fixed clock.
pub fn build_test_app() -> Router {
    build_test_app_with(
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(InMemoryBlobStore::new(MEDIA_BASE_URL, 4)),
    )
}

/// Build the full app router over the given stores and a fixed clock.
pub fn build_test_app_with(
    documents: Arc<dyn DocumentRepository>,
    blobs: Arc<dyn BlobStore>,
) -> Router {
    broadsheet_api::app(AppState::new(fixed_clock(), documents, blobs))
}

/// The signed-in caller of a request, as the gateway would forward it.
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    /// Value of `x-user-key`.
    pub key: &'a str,
    /// Value of `x-user-name`, if any.
    pub name: Option<&'a str>,
}

/// A signed-in caller with a display name.
pub fn caller<'a>(key: &'a str, name: &'a str) -> Caller<'a> {
    Caller {
        key,
        name: Some(name),
    }
}

fn request(method: Method, uri: &str, caller: Option<Caller<'_>>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("x-user-key", caller.key);
        if let Some(name) = caller.name {
            builder = builder.header("x-user-name", name);
        }
    }
    builder
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    caller: Option<Caller<'_>>,
    body: &Value,
) -> (StatusCode, Value) {
    let request = request(method, uri, caller)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    caller: Option<Caller<'_>>,
    body: &Value,
) -> (StatusCode, Value) {
    send_json(app, Method::POST, uri, caller, body).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    caller: Option<Caller<'_>>,
    body: &Value,
) -> (StatusCode, Value) {
    send_json(app, Method::PUT, uri, caller, body).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = request(Method::GET, uri, None).body(Body::empty()).unwrap();

    send(app, request).await
}

/// Send a GET request and return the status, content type and raw body.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = request(Method::GET, uri, None).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|value| value.to_str().unwrap().to_owned());
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, body.to_vec())
}

/// Send a multipart POST with one file part per `(file name, bytes)` pair.
pub async fn post_files(
    app: Router,
    uri: &str,
    caller: Option<Caller<'_>>,
    files: &[(&str, &[u8])],
) -> (StatusCode, Value) {
    let mut body = Vec::new();
    for (name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = request(Method::POST, uri, caller)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    send(app, request).await
}
