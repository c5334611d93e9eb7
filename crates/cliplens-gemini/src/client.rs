use anyhow::{Context, Result};
use async_trait::async_trait;
use cliplens_core::{
    config::ProviderConfig, GenerationRequest, GenerationResponse, ProviderResult, RemoteFile,
    VideoProvider, VideoUpload,
};
use reqwest::{Client, RequestBuilder};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Settings for a `GeminiClient`.
#[derive(Clone)]
pub struct GeminiClientConfig {
    pub api_key: String,
    pub model: String,
    /// Scheme and host, no trailing slash. Tests point this at a local mock server.
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiClientConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ProviderConfig> for GeminiClientConfig {
    fn from(config: &ProviderConfig) -> Self {
        GeminiClientConfig::new(config.api_key.clone(), config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(Duration::from_secs(config.http_timeout_secs))
    }
}

/// Gemini REST client (File API + generateContent)
#[derive(Clone)]
pub struct GeminiClient {
    pub(crate) http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client for Gemini")?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/v1beta/{path}`
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            API_VERSION,
            path.trim_start_matches('/')
        )
    }

    /// `{base}/upload/v1beta/{path}`
    pub(crate) fn upload_url(&self, path: &str) -> String {
        format!(
            "{}/upload/{}/{}",
            self.base_url,
            API_VERSION,
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }
}

#[async_trait]
impl VideoProvider for GeminiClient {
    async fn upload_file(&self, video: VideoUpload) -> ProviderResult<RemoteFile> {
        self.upload(video).await
    }

    async fn get_file(&self, name: &str) -> ProviderResult<RemoteFile> {
        self.fetch_file(name).await
    }

    async fn delete_file(&self, name: &str) -> ProviderResult<()> {
        self.remove_file(name).await
    }

    async fn generate(&self, request: GenerationRequest) -> ProviderResult<GenerationResponse> {
        self.generate_content(request).await
    }
}
