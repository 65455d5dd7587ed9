use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use school_shared::api::UploadResponse;

use crate::error::AppError;
use crate::routes::AppState;
use crate::uploads::{allowed_file, sanitize_filename};

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "upload";

fn upload_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::Validation(format!("{}: {}", context, err.body_text()))
}

/// POST /admin/upload-image
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "Malformed upload"))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, "Failed to read upload"))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| AppError::Validation("No file part".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    let safe_name = sanitize_filename(&filename);
    if !allowed_file(&filename) || !allowed_file(&safe_name) {
        return Err(AppError::Validation("Invalid file type".to_string()));
    }

    state.blobs.put(&safe_name, &data).await?;

    let url = state.blobs.public_url(&safe_name);
    tracing::info!(file = %safe_name, size = data.len(), "Image uploaded");

    Ok(Json(UploadResponse { url }))
}
