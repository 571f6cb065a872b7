//! Integration tests for the media upload endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use broadsheet_core::blob::BlobStore;
use broadsheet_memory_store::{InMemoryBlobStore, InMemoryDocumentRepository};
use broadsheet_test_support::ScriptedBlobStore;

use common::caller;

const URI: &str = "/api/v1/media/images";

#[tokio::test]
async fn test_batch_urls_come_back_in_submission_order() {
    // Arrange
    let app = common::build_test_app();
    let files = [
        ("a.png", b"first".as_slice()),
        ("b.png", b"second".as_slice()),
        ("c.png", b"third".as_slice()),
    ];

    // Act
    let (status, json) =
        common::post_files(app, URI, Some(caller("ada", "Ada Lovelace")), &files).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["urls"],
        serde_json::json!([
            "https://cdn.example/media/images/a.png",
            "https://cdn.example/media/images/b.png",
            "https://cdn.example/media/images/c.png",
        ])
    );
}

#[tokio::test]
async fn test_more_than_four_files_are_rejected() {
    let app = common::build_test_app();
    let names = ["1.png", "2.png", "3.png", "4.png", "5.png"];
    let files: Vec<(&str, &[u8])> = names.iter().map(|name| (*name, b"x".as_slice())).collect();

    let (status, json) =
        common::post_files(app, URI, Some(caller("ada", "Ada Lovelace")), &files).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "batch_too_large");
}

#[tokio::test]
async fn test_one_failed_upload_fails_the_batch() {
    // Arrange
    let app = common::build_test_app_with(
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(
            ScriptedBlobStore::new(common::MEDIA_BASE_URL).fail("images/b.png", "quota exceeded"),
        ),
    );
    let files = [
        ("a.png", b"first".as_slice()),
        ("b.png", b"second".as_slice()),
        ("c.png", b"third".as_slice()),
    ];

    // Act
    let (status, json) =
        common::post_files(app, URI, Some(caller("ada", "Ada Lovelace")), &files).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "upload_failed");
    assert!(json["message"].as_str().unwrap().contains("file 1"));
    assert!(json.get("urls").is_none());
}

#[tokio::test]
async fn test_empty_form_uploads_nothing() {
    let app = common::build_test_app();

    let (status, json) =
        common::post_files(app, URI, Some(caller("ada", "Ada Lovelace")), &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["urls"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_requires_signed_in_user() {
    let app = common::build_test_app();

    let (status, json) = common::post_files(app, URI, None, &[("a.png", b"x".as_slice())]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthenticated");
}

#[tokio::test]
async fn test_file_names_with_path_segments_are_rejected() {
    // Arrange
    let blobs = Arc::new(InMemoryBlobStore::new(common::MEDIA_BASE_URL, 4));
    let app = common::build_test_app_with(
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::clone(&blobs) as Arc<dyn BlobStore>,
    );
    let files = [
        ("a.png", b"fine".as_slice()),
        ("../profilePictures/ada", b"not a portrait".as_slice()),
    ];

    // Act
    let (status, json) = common::post_files(app, URI, Some(caller("bob", "Bob")), &files).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(blobs.get("profilePictures/ada").await.unwrap(), None);
    assert_eq!(blobs.get("images/a.png").await.unwrap(), None);
}

#[tokio::test]
async fn test_uploaded_image_is_served_at_its_url() {
    // Arrange
    let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new(common::MEDIA_BASE_URL, 4));
    let documents = Arc::new(InMemoryDocumentRepository::new());
    let upload_app = common::build_test_app_with(documents.clone(), Arc::clone(&blobs));
    let (status, json) = common::post_files(
        upload_app,
        URI,
        Some(caller("ada", "Ada Lovelace")),
        &[("beach day.png", b"\x89PNG pixels".as_slice())],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let url = json["urls"][0].as_str().unwrap();
    let served_path = url.strip_prefix("https://cdn.example").unwrap();

    // Act
    let app = common::build_test_app_with(documents, blobs);
    let (status, content_type, body) = common::get_raw(app, served_path).await;

    // Assert
    assert_eq!(served_path, "/media/images/beach%20day.png");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, b"\x89PNG pixels");
}

#[tokio::test]
async fn test_missing_media_file_is_not_found() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/media/images/nothing.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}
