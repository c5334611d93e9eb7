//! Error types module
//!
//! All request-level failures are unified under `AppError`. Each variant
//! self-describes how it is presented over HTTP through `ErrorMetadata`.
//!
//! `Display` is the raw error message reported in the `error` field of a 500
//! response; `client_message` is the fixed human-readable `message`.

use crate::provider::ProviderError;

/// Fixed message for every failure inside the analysis pipeline.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Error analyzing video";

/// Fixed message when the request carries no `video` field.
pub const VIDEO_REQUIRED_MESSAGE: &str = "Video file is required";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like provider throttling
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PROVIDER_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden when redaction is enabled
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("File processing failed")]
    FileProcessingFailed { name: String, state: String },

    #[error("File processing timed out after {waited_secs}s")]
    ProcessingTimeout { name: String, waited_secs: u64 },

    #[error("{message}")]
    Provider {
        message: String,
        status: Option<u16>,
    },
}

impl AppError {
    /// The 400 returned when the `video` field is absent.
    pub fn video_required() -> Self {
        AppError::BadRequest(VIDEO_REQUIRED_MESSAGE.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::BadRequest(_) => (400, "BAD_REQUEST", false, false, LogLevel::Debug),
        AppError::FileProcessingFailed { .. } => (
            500,
            "FILE_PROCESSING_FAILED",
            false,
            false,
            LogLevel::Warn,
        ),
        AppError::ProcessingTimeout { .. } => {
            (500, "PROCESSING_TIMEOUT", true, false, LogLevel::Warn)
        }
        AppError::Provider { status, .. } => match status {
            Some(429) => (500, "PROVIDER_RATE_LIMITED", true, true, LogLevel::Warn),
            Some(s) if *s < 500 => (500, "PROVIDER_REJECTED", false, true, LogLevel::Error),
            _ => (500, "PROVIDER_ERROR", true, true, LogLevel::Error),
        },
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::BadRequest(_) => "BadRequest",
            AppError::FileProcessingFailed { .. } => "FileProcessingFailed",
            AppError::ProcessingTimeout { .. } => "ProcessingTimeout",
            AppError::Provider { .. } => "Provider",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(ref msg) => msg.clone(),
            _ => ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }
}
