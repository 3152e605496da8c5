//! Integration tests for POST /api/upload.

use std::collections::HashSet;

use axum::http::StatusCode;

use crate::helpers::{self, Part, TestApp, pdf_bytes};

#[tokio::test]
async fn test_upload_sample_defaults() {
    let app = TestApp::new().await;
    let data = pdf_bytes(2 * 1024 * 1024);

    let response = app.upload_pdf("sample.pdf", &data).await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    let file = &response.body["file"];
    assert_eq!(file["category"], "exercise");
    assert_eq!(file["sizeLabel"], "2.00 MB");
    assert_eq!(file["displayName"], "sample");
    assert_eq!(file["originalName"], "sample.pdf");

    let storage_name = file["storageName"].as_str().unwrap();
    assert!(storage_name.starts_with("pdf-"));
    assert!(storage_name.ends_with(".pdf"));
    assert_eq!(file["storagePath"], storage_name);
    assert_eq!(file["downloadRef"], format!("/pdfs/{storage_name}"));
}

#[tokio::test]
async fn test_uploaded_record_is_listed_and_downloadable() {
    let app = TestApp::new().await;
    let data = pdf_bytes(4096);

    let response = app
        .upload(&[
            Part::Text {
                name: "category",
                value: "math",
            },
            Part::File {
                field: "pdf",
                filename: "algebra.pdf",
                content_type: "application/pdf",
                data: &data,
            },
        ])
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let id = response.body["file"]["id"].as_str().unwrap().to_string();
    let download_ref = response.body["file"]["downloadRef"]
        .as_str()
        .unwrap()
        .to_string();

    let list = app.request("GET", "/api/pdfs").await;
    let math = list.body["math"].as_array().unwrap();
    assert_eq!(math.len(), 1);
    assert_eq!(math[0]["id"], id.as_str());
    assert!(list.body["exercise"].as_array().unwrap().is_empty());

    let (status, bytes) = app.get_raw(&download_ref).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, data);
}

#[tokio::test]
async fn test_form_fields_after_file_are_applied() {
    let app = TestApp::new().await;
    let data = pdf_bytes(128);

    let response = app
        .upload(&[
            Part::File {
                field: "pdf",
                filename: "ch1.pdf",
                content_type: "application/pdf",
                data: &data,
            },
            Part::Text {
                name: "category",
                value: "physics",
            },
            Part::Text {
                name: "filename",
                value: "Chapter One",
            },
        ])
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["file"]["category"], "physics");
    assert_eq!(response.body["file"]["displayName"], "Chapter One");

    let list = app.request("GET", "/api/pdfs").await;
    assert_eq!(list.body["physics"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_file_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[Part::Text {
            name: "category",
            value: "math",
        }])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_empty_file_part_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[Part::File {
            field: "pdf",
            filename: "",
            content_type: "application/octet-stream",
            data: b"",
        }])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_blob_count(), 0);
}

#[tokio::test]
async fn test_text_plain_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[Part::File {
            field: "pdf",
            filename: "notes.txt",
            content_type: "text/plain",
            data: b"just text",
        }])
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(response.body["error"].is_string());
    assert_eq!(app.stored_blob_count(), 0);
    let list = app.request("GET", "/api/pdfs").await;
    assert!(helpers::all_ids(&list.body).is_empty());
}

#[tokio::test]
async fn test_size_ceiling_boundary() {
    let app = TestApp::new().await;

    let exact = pdf_bytes(50 * 1024 * 1024);
    let response = app.upload_pdf("exact.pdf", &exact).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["file"]["sizeLabel"], "50.00 MB");
    drop(exact);

    let over = pdf_bytes(51 * 1024 * 1024);
    let response = app.upload_pdf("over.pdf", &over).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.stored_blob_count(), 1);

    let list = app.request("GET", "/api/pdfs").await;
    assert_eq!(helpers::all_ids(&list.body).len(), 1);
}

#[tokio::test]
async fn test_small_ceiling_is_enforced_while_streaming() {
    let app = TestApp::with_max_upload(1024).await;

    let response = app.upload_pdf("a.pdf", &pdf_bytes(1024)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.upload_pdf("b.pdf", &pdf_bytes(1025)).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.stored_blob_count(), 1);
}

#[tokio::test]
async fn test_concurrent_uploads_get_distinct_ids_and_names() {
    let app = TestApp::new().await;
    let data = pdf_bytes(2048);

    let tasks = (0..12).map(|i| {
        let router = app.router.clone();
        let data = data.clone();
        tokio::spawn(async move {
            let filename = format!("doc{i}.pdf");
            let req = helpers::upload_request(&[Part::File {
                field: "pdf",
                filename: &filename,
                content_type: "application/pdf",
                data: &data,
            }]);
            helpers::send(&router, req).await
        })
    });

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for response in futures::future::join_all(tasks).await {
        let response = response.unwrap();
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        ids.insert(response.body["file"]["id"].as_str().unwrap().to_string());
        names.insert(
            response.body["file"]["storageName"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }

    assert_eq!(ids.len(), 12);
    assert_eq!(names.len(), 12);

    let list = app.request("GET", "/api/pdfs").await;
    assert_eq!(helpers::all_ids(&list.body).len(), 12);
}
