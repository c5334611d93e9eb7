use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_video_field;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use cliplens_core::{AnalysisResponse, AppError, ErrorBody};
use std::sync::Arc;

/// Analyze a video ad
///
/// Uploads the `video` form field to the generative model, waits for it to be
/// processed and returns the model's critique.
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Form with a `video` file field"
    ),
    responses(
        (status = 200, description = "Video analyzed", body = AnalysisResponse),
        (status = 400, description = "Video file missing or form malformed", body = ErrorBody),
        (status = 500, description = "Analysis failed", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, HttpAppError> {
    let video = match multipart {
        Ok(multipart) => extract_video_field(multipart)
            .await
            .map_err(|e| state.http_error(e))?,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Request is not a multipart form");
            None
        }
    };

    let video = video.ok_or_else(|| state.http_error(AppError::video_required()))?;

    let analysis = state
        .analyzer
        .analyze(video)
        .await
        .map_err(|e| state.http_error(e))?;

    Ok(Json(AnalysisResponse { analysis }))
}
