//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::handlers;
use cliplens_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ClipLens API",
        version = "0.1.0",
        description = "Video ad analysis. Upload a video as multipart form data and receive a written critique covering content, key messages, audience engagement, visual and audio elements, brand consistency and suggested improvements."
    ),
    paths(
        handlers::analyze::analyze_video,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::AnalysisResponse,
            models::ErrorBody,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "analysis", description = "Video ad analysis"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;
