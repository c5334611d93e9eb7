//! Route paths and fixed names used by the API.

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/health";
pub const OPENAPI_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/docs";

/// Multipart field carrying the video
pub const VIDEO_FIELD: &str = "video";

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
