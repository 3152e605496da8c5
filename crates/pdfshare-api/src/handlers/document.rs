//! PDF list, upload, and delete handlers.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;

use pdfshare_core::error::AppError;
use pdfshare_core::result::AppResult;
use pdfshare_core::traits::blob_store::BlobStream;
use pdfshare_core::types::{IncomingBlob, StoredBlob};
use pdfshare_service::UploadForm;

use crate::dto::response::{MessageResponse, UploadResponse};
use crate::error::{ApiError, multipart_error};
use crate::state::AppState;

/// GET /api/pdfs
pub async fn list_pdfs(State(state): State<AppState>) -> Response {
    let catalog = state.documents.list().await;
    Json(&*catalog).into_response()
}

/// POST /api/upload: multipart with a file part plus optional
/// `category` and `filename` fields.
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut form = UploadForm::default();
    let mut stored: Option<(StoredBlob, String)> = None;

    if let Err(e) = read_upload(&state, &mut multipart, &mut form, &mut stored).await {
        if let Some((blob, _)) = &stored {
            state.documents.discard(blob).await;
        }
        return Err(e.into());
    }

    let (blob, original_name) =
        stored.ok_or_else(|| AppError::validation("No file provided"))?;
    let record = state
        .documents
        .register(blob, &original_name, form)
        .await?;

    Ok(Json(UploadResponse::new(record)))
}

/// DELETE /api/delete/{id}
pub async fn delete_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.documents.delete(&id).await?;
    Ok(Json(MessageResponse::ok("File deleted successfully")))
}

/// Walk the multipart body, streaming the file part into the blob store as
/// soon as it arrives and collecting the text fields around it.
async fn read_upload(
    state: &AppState,
    multipart: &mut Multipart,
    form: &mut UploadForm,
    stored: &mut Option<(StoredBlob, String)>,
) -> AppResult<()> {
    let upload_field = state.config.storage.upload_field.as_str();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        if name == upload_field {
            // Browsers send an empty, nameless part when no file was picked.
            let original_name = match field.file_name() {
                Some(file_name) if !file_name.is_empty() => file_name.to_string(),
                _ => continue,
            };
            if stored.is_some() {
                return Err(AppError::validation("Only one file may be uploaded"));
            }

            let upload = IncomingBlob {
                field_name: name,
                original_name,
                content_type: field.content_type().map(String::from),
            };
            let stream: BlobStream<'_> = Box::pin(field.map(|chunk| chunk.map_err(stream_error)));
            let blob = state.documents.store_blob(&upload, stream).await?;
            *stored = Some((blob, upload.original_name));
            continue;
        }

        match name.as_str() {
            "category" => form.category = Some(field.text().await.map_err(multipart_error)?),
            "filename" => {
                form.display_name = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }

    Ok(())
}

/// Carry a body read failure into the blob store, keeping "body too large"
/// recognizable so it is reported as such.
fn stream_error(err: MultipartError) -> std::io::Error {
    let kind = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        std::io::ErrorKind::FileTooLarge
    } else {
        std::io::ErrorKind::Other
    };
    std::io::Error::new(kind, err)
}
