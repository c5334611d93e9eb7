//! Multipart extraction for the analysis endpoint

use axum::extract::Multipart;
use cliplens_core::{AppError, VideoUpload};

use crate::constants::VIDEO_FIELD;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_DISPLAY_NAME: &str = "video";

/// Read the first field named `video` from the form.
///
/// Other fields are skipped. Returns `Ok(None)` when the form has no such
/// field. Content type and filename are passed through as sent; missing values
/// fall back to `application/octet-stream` and `video`.
pub async fn extract_video_field(
    mut multipart: Multipart,
) -> Result<Option<VideoUpload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let display_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        let mime_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

        tracing::debug!(
            display_name = %display_name,
            mime_type = %mime_type,
            size_bytes = data.len(),
            "Received video upload"
        );

        return Ok(Some(VideoUpload::new(data, mime_type, display_name)));
    }

    Ok(None)
}
