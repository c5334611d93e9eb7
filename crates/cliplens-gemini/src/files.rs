//! Gemini File API: resumable upload, metadata lookup and deletion.

use cliplens_core::{ProviderError, ProviderResult, RemoteFile, VideoUpload};
use serde::{Deserialize, Serialize};

use crate::client::GeminiClient;
use crate::error::{check_response, transport};

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

#[derive(Debug, Serialize)]
struct StartUploadRequest<'a> {
    file: StartUploadFile<'a>,
}

#[derive(Debug, Serialize)]
struct StartUploadFile<'a> {
    display_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

/// Accept both `files/abc` and bare `abc`.
fn resource_name(name: &str) -> String {
    if name.starts_with("files/") {
        name.to_string()
    } else {
        format!("files/{}", name)
    }
}

impl GeminiClient {
    /// Two-step resumable upload: open a session, then send every byte and finalize.
    pub(crate) async fn upload(&self, video: VideoUpload) -> ProviderResult<RemoteFile> {
        let size = video.len();
        tracing::debug!(
            display_name = %video.display_name,
            mime_type = %video.mime_type,
            size_bytes = size,
            "Starting Gemini file upload"
        );

        let response = self
            .authorized(self.http_client.post(self.upload_url("files")))
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", size.to_string())
            .header("X-Goog-Upload-Header-Content-Type", video.mime_type.as_str())
            .json(&StartUploadRequest {
                file: StartUploadFile {
                    display_name: &video.display_name,
                },
            })
            .send()
            .await
            .map_err(transport)?;

        let response = check_response(response, "upload_start").await?;

        let session_url = response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("upload session URL missing".to_string())
            })?;

        let response = self
            .authorized(self.http_client.post(&session_url))
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(video.data)
            .send()
            .await
            .map_err(transport)?;

        let response = check_response(response, "upload_finalize").await?;

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            file_name = %uploaded.file.name,
            state = %uploaded.file.state,
            size_bytes = size,
            "Uploaded video to Gemini"
        );

        Ok(uploaded.file)
    }

    pub(crate) async fn fetch_file(&self, name: &str) -> ProviderResult<RemoteFile> {
        let response = self
            .authorized(self.http_client.get(self.api_url(&resource_name(name))))
            .send()
            .await
            .map_err(transport)?;

        let response = check_response(response, "get_file").await?;

        response
            .json::<RemoteFile>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    pub(crate) async fn remove_file(&self, name: &str) -> ProviderResult<()> {
        let response = self
            .authorized(self.http_client.delete(self.api_url(&resource_name(name))))
            .send()
            .await
            .map_err(transport)?;

        check_response(response, "delete_file").await?;

        tracing::debug!(file_name = %name, "Deleted Gemini file");
        Ok(())
    }
}
