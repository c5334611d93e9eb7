//! Generative-AI provider construction

use anyhow::{Context, Result};
use cliplens_core::{Config, VideoProvider};
use cliplens_gemini::{GeminiClient, GeminiClientConfig};
use std::sync::Arc;

/// Build the provider client once; every request shares it.
pub fn setup_provider(config: &Config) -> Result<Arc<dyn VideoProvider>> {
    let client = GeminiClient::new(GeminiClientConfig::from(&config.provider))
        .context("Failed to initialize Gemini client")?;

    tracing::info!(
        model = %client.model(),
        base_url = %client.base_url(),
        timeout_secs = config.provider.http_timeout_secs,
        "Gemini provider configured"
    );

    Ok(Arc::new(client))
}
