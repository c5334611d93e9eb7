//! Application setup and initialization
//!
//! Startup order: telemetry, configuration validation, provider client,
//! shared state, routes.

pub mod provider;
pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use cliplens_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let provider = provider::setup_provider(&config)?;
    let state = Arc::new(AppState::new(config.clone(), provider));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
