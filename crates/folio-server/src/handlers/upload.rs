//! Image upload endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Form field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Response for POST /api/upload-image.
#[derive(Serialize)]
pub(crate) struct UploadResponse {
    success: bool,
    url: String,
}

/// Handle POST /api/upload-image.
pub(crate) async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ServerError> {
    let (filename, data) = read_image_field(multipart?)
        .await?
        .ok_or_else(|| ServerError::BadRequest("No image part".to_owned()))?;
    if filename.is_empty() {
        return Err(ServerError::BadRequest("No selected file".to_owned()));
    }

    let uploads = state.uploads.clone();
    let size = data.len();
    let stored = tokio::task::spawn_blocking(move || uploads.save(&filename, &data)).await??;
    tracing::info!(file = %stored.filename, size, "Stored upload");

    Ok(Json(UploadResponse {
        success: true,
        url: stored.url,
    }))
}

/// First `image` field of the form as (client filename, contents).
async fn read_image_field(
    mut multipart: Multipart,
) -> Result<Option<(String, Bytes)>, ServerError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            let filename = field.file_name().unwrap_or_default().to_owned();
            let data = field.bytes().await?;
            return Ok(Some((filename, data)));
        }
    }
    Ok(None)
}
