//! Application state shared by all handlers.

use cliplens_core::{AppError, Config, VideoProvider};
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::services::analysis::VideoAnalyzer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: VideoAnalyzer,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn VideoProvider>) -> Self {
        let analyzer = VideoAnalyzer::from_config(provider, &config);
        Self { config, analyzer }
    }

    /// Build an HTTP error that honors `REDACT_ERROR_DETAILS`.
    pub fn http_error(&self, err: impl Into<AppError>) -> HttpAppError {
        HttpAppError::new(err).redacted(self.config.redact_error_details())
    }
}
