//! Configuration validation
//!
//! Validates configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use cliplens_core::Config;

/// Validate configuration values that would break request handling
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.max_upload_size_bytes() == 0 {
        return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
    }

    if let Some(max_wait) = config.processing_timeout() {
        if max_wait < config.poll_interval() {
            tracing::warn!(
                processing_timeout_secs = max_wait.as_secs(),
                poll_interval_secs = config.poll_interval().as_secs(),
                "Processing timeout is shorter than the poll interval - any file that is not ready on the first check will time out"
            );
        }
    } else {
        tracing::warn!(
            "PROCESSING_TIMEOUT_SECS is 0 - requests wait for file processing without limit"
        );
    }

    if config.is_production() && !config.redact_error_details() {
        tracing::warn!(
            "REDACT_ERROR_DETAILS is off in production - provider error messages are returned to clients"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
