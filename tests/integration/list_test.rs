//! Integration tests for listing, health, and static files.

use axum::http::StatusCode;

use crate::helpers::{TestApp, all_ids, pdf_bytes};

#[tokio::test]
async fn test_fresh_catalog_lists_default_categories() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/pdfs").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "exercise": [], "math": [] })
    );
}

#[tokio::test]
async fn test_list_preserves_upload_order() {
    let app = TestApp::new().await;
    let mut expected = Vec::new();
    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        let response = app.upload_pdf(name, &pdf_bytes(32)).await;
        expected.push(response.body["file"]["id"].as_str().unwrap().to_string());
    }

    let response = app.request("GET", "/api/pdfs").await;
    assert_eq!(all_ids(&response.body), expected);
}

#[tokio::test]
async fn test_snapshot_file_mirrors_listing() {
    let app = TestApp::new().await;
    app.upload_pdf("a.pdf", &pdf_bytes(32)).await;

    let listed = app.request("GET", "/api/pdfs").await.body;
    let snapshot = std::fs::read(&app.config.catalog.snapshot_path).unwrap();
    let on_disk: serde_json::Value = serde_json::from_slice(&snapshot).unwrap();
    assert_eq!(listed, on_disk);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_fresh() {
    let app = TestApp::new().await;
    std::fs::write(&app.config.catalog.snapshot_path, "{ broken").unwrap();

    let router = app.restart().await;
    let req = axum::http::Request::builder()
        .uri("/api/pdfs")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = crate::helpers::send(&router, req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "exercise": [], "math": [] })
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    app.upload_pdf("a.pdf", &pdf_bytes(32)).await;

    let response = app.request("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["records"], 1);
}

#[tokio::test]
async fn test_public_directory_is_served() {
    let app = TestApp::new().await;
    std::fs::write(
        app.dir.path().join("public").join("index.html"),
        "<h1>PDF Share</h1>",
    )
    .unwrap();

    let (status, body) = app.get_raw("/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>PDF Share</h1>");
}

#[tokio::test]
async fn test_unknown_blob_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app.get_raw("/pdfs/pdf-0-0.pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
