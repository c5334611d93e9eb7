//! ClipLens Core Library
//!
//! This crate provides the domain models, provider abstraction, error types and
//! configuration shared by the Gemini client and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AnalysisResponse, Content, ErrorBody, FileData, FileState, GenerationConfig,
    GenerationRequest, GenerationResponse, Part, RemoteFile, Role,
};
pub use provider::{ProviderError, ProviderResult, VideoProvider, VideoUpload};
