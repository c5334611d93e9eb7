//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Anything convertible into
//! `AppError` (including `AnalysisError`) renders as an `ErrorBody`:
//! `{ "message" }` for 4xx and `{ "message", "error" }` for 5xx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cliplens_core::{AppError, ErrorBody, ErrorMetadata, LogLevel};

use crate::services::analysis::AnalysisError;

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    /// Hide the `error` detail of sensitive failures
    pub redact_details: bool,
}

impl HttpAppError {
    pub fn new(error: impl Into<AppError>) -> Self {
        Self {
            error: error.into(),
            redact_details: false,
        }
    }

    pub fn redacted(mut self, redact: bool) -> Self {
        self.redact_details = redact;
        self
    }

    fn body(&self) -> ErrorBody {
        let error = &self.error;
        let message = error.client_message();

        if error.http_status_code() < 500 {
            return ErrorBody::new(message);
        }

        if self.redact_details && error.is_sensitive() {
            ErrorBody::new(message)
        } else {
            ErrorBody::with_error(message, error.to_string())
        }
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err)
    }
}

impl From<AnalysisError> for HttpAppError {
    fn from(err: AnalysisError) -> Self {
        HttpAppError::new(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, code = code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, code = code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                code = code,
                recoverable = error.is_recoverable(),
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.error);

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliplens_core::{FileState, ProviderError};

    fn body_json(err: HttpAppError) -> serde_json::Value {
        serde_json::to_value(err.body()).unwrap()
    }

    #[test]
    fn test_video_required_body_has_message_only() {
        let err = HttpAppError::from(AppError::video_required());
        assert_eq!(
            body_json(err),
            serde_json::json!({ "message": "Video file is required" })
        );
    }

    #[test]
    fn test_provider_error_body_carries_provider_message() {
        let err = HttpAppError::from(AnalysisError::Provider(ProviderError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        }));
        assert_eq!(
            body_json(err),
            serde_json::json!({
                "message": "Error analyzing video",
                "error": "quota exceeded"
            })
        );
    }

    #[test]
    fn test_processing_failure_body() {
        let err = HttpAppError::from(AnalysisError::ProcessingFailed {
            name: "files/abc".to_string(),
            state: FileState::Failed,
        });
        assert_eq!(
            body_json(err),
            serde_json::json!({
                "message": "Error analyzing video",
                "error": "File processing failed"
            })
        );
    }

    #[test]
    fn test_redaction_hides_sensitive_details_only() {
        let provider = HttpAppError::from(AnalysisError::Provider(ProviderError::Transport(
            "dns error: api key abc".to_string(),
        )))
        .redacted(true);
        assert_eq!(
            body_json(provider),
            serde_json::json!({ "message": "Error analyzing video" })
        );

        let processing = HttpAppError::from(AnalysisError::ProcessingFailed {
            name: "files/abc".to_string(),
            state: FileState::Failed,
        })
        .redacted(true);
        assert_eq!(
            body_json(processing)["error"],
            serde_json::json!("File processing failed")
        );
    }

    #[test]
    fn test_status_codes() {
        let response = HttpAppError::from(AppError::video_required()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAppError::from(AnalysisError::ProcessingTimeout {
            name: "files/abc".to_string(),
            waited_secs: 600,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
