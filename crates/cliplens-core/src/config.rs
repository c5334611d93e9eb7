//! Configuration module
//!
//! Settings are read once at startup from the process environment (after
//! loading `.env` with dotenvy) and shared read-only afterwards.

use std::env;
use std::str::FromStr;
use std::time::Duration;

// Common constants
const SERVER_PORT: u16 = 3000;
const HTTP_CONCURRENCY_LIMIT: usize = 1000;
const MAX_UPLOAD_SIZE_MB: usize = 2048;
const GEMINI_MODEL: &str = "gemini-1.5-pro-exp-0827";
const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_HTTP_TIMEOUT_SECS: u64 = 300;
const POLL_INTERVAL_SECS: u64 = 5;
const PROCESSING_TIMEOUT_SECS: u64 = 600;

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub max_upload_size_bytes: usize,
    pub log_format: String,
}

/// Generative-AI provider settings
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub http_timeout_secs: u64,
}

// Never print the API key.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

/// Analysis pipeline settings
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub poll_interval_secs: u64,
    /// 0 = wait for processing indefinitely.
    pub processing_timeout_secs: u64,
    pub redact_error_details: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub provider: ProviderConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_bytes =
            parse_or(&lookup, "MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB)
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                HTTP_CONCURRENCY_LIMIT,
            )
            .max(1),
            max_upload_size_bytes,
            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let provider = ProviderConfig {
            api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
            base_url: lookup("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout_secs: parse_or(
                &lookup,
                "GEMINI_HTTP_TIMEOUT_SECS",
                GEMINI_HTTP_TIMEOUT_SECS,
            ),
        };

        let analysis = AnalysisConfig {
            poll_interval_secs: parse_or(&lookup, "POLL_INTERVAL_SECS", POLL_INTERVAL_SECS),
            processing_timeout_secs: parse_or(
                &lookup,
                "PROCESSING_TIMEOUT_SECS",
                PROCESSING_TIMEOUT_SECS,
            ),
            redact_error_details: parse_or(&lookup, "REDACT_ERROR_DETAILS", false),
        };

        Ok(Config {
            base,
            provider,
            analysis,
        })
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.analysis.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!("POLL_INTERVAL_SECS must be at least 1"));
        }

        if self.provider.model.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_MODEL must not be empty"));
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!("GEMINI_API_BASE_URL must be an http(s) URL"));
        }

        if !matches!(self.base.log_format.as_str(), "compact" | "json") {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'compact' or 'json'"));
        }

        // Provider calls fail with an authentication error when the key is absent.
        if self.provider.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; provider calls will be rejected");
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.base.max_upload_size_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.analysis.poll_interval_secs)
    }

    /// Upper bound on waiting for the provider to process an upload.
    pub fn processing_timeout(&self) -> Option<Duration> {
        match self.analysis.processing_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn redact_error_details(&self) -> bool {
        self.analysis.redact_error_details
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().to_lowercase().parse().ok())
        .unwrap_or(default)
}
