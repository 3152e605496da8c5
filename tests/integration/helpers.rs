//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pdfshare_core::config::AppConfig;

const BOUNDARY: &str = "pdfshare-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config pointing into the temp directory
    pub config: AppConfig,
    /// Owns every file the app writes
    pub dir: TempDir,
}

/// One part of a multipart upload body
pub enum Part<'a> {
    /// A file part
    File {
        field: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    /// A plain text field
    Text { name: &'a str, value: &'a str },
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with the default 50 MiB ceiling
    pub async fn new() -> Self {
        Self::with_max_upload(50 * 1024 * 1024).await
    }

    /// Create a new test application with a custom upload ceiling
    pub async fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let path = |p: &str| root.join(p).to_string_lossy().into_owned();

        let mut config = AppConfig::default();
        config.storage.data_root = path("data");
        config.storage.upload_dir = path("uploads");
        config.storage.staging_dir = path("data/tmp");
        config.storage.public_dir = path("public");
        config.storage.max_upload_size_bytes = max_upload_size_bytes;
        config.catalog.snapshot_path = path("database.json");

        let router = Self::build_router(&config).await;
        Self {
            router,
            config,
            dir,
        }
    }

    /// Build a fresh router over the same directories, as after a restart
    pub async fn restart(&self) -> Router {
        Self::build_router(&self.config).await
    }

    async fn build_router(config: &AppConfig) -> Router {
        let state = pdfshare_api::build_state(config.clone())
            .await
            .expect("Failed to build state");
        pdfshare_api::build_app(state)
    }

    /// Make an HTTP request without a body
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        send(&self.router, req).await
    }

    /// Fetch a path and return the raw body bytes
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    /// POST a multipart body to /api/upload
    pub async fn upload(&self, parts: &[Part<'_>]) -> TestResponse {
        send(&self.router, upload_request(parts)).await
    }

    /// Upload a PDF with only the file part
    pub async fn upload_pdf(&self, filename: &str, data: &[u8]) -> TestResponse {
        self.upload(&[Part::File {
            field: "pdf",
            filename,
            content_type: "application/pdf",
            data,
        }])
        .await
    }

    /// Number of files in the upload directory
    pub fn stored_blob_count(&self) -> usize {
        std::fs::read_dir(&self.config.storage.upload_dir)
            .expect("Failed to read upload dir")
            .count()
    }
}

/// Build a POST /api/upload request from parts
pub fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("Failed to build request")
}

/// Send a request and parse the JSON response
pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                field,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A payload that starts like a PDF
pub fn pdf_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![b'0'; len];
    let header = b"%PDF-1.7\n";
    let n = header.len().min(len);
    data[..n].copy_from_slice(&header[..n]);
    data
}

/// All record ids in a GET /api/pdfs body
pub fn all_ids(catalog: &Value) -> Vec<String> {
    catalog
        .as_object()
        .expect("catalog is an object")
        .values()
        .flat_map(|records| records.as_array().expect("category is an array"))
        .map(|r| r["id"].as_str().expect("id is a string").to_string())
        .collect()
}
