//! Generative-AI provider abstraction
//!
//! This module defines the `VideoProvider` trait the analysis pipeline talks to.
//! The production implementation lives in `cliplens-gemini`; tests substitute
//! in-memory doubles.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::{GenerationRequest, GenerationResponse, RemoteFile};

/// Provider operation errors
///
/// `Display` for `Api` and `Transport` is the provider's own message, unmodified.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Blocked(String),
}

impl ProviderError {
    /// HTTP status reported by the provider, if the call reached it.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Video received from a client, ready to be handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpload {
    pub data: Bytes,
    pub mime_type: String,
    pub display_name: String,
}

impl VideoUpload {
    pub fn new(
        data: impl Into<Bytes>,
        mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            display_name: display_name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Capability surface the analysis pipeline needs from a generative-AI provider.
///
/// Files are addressed by `RemoteFile::name`. Implementations must be cheap to
/// share across requests (`Arc<dyn VideoProvider>`).
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Upload raw bytes and return the new file handle
    async fn upload_file(&self, video: VideoUpload) -> ProviderResult<RemoteFile>;

    /// Fetch the current state of a file
    async fn get_file(&self, name: &str) -> ProviderResult<RemoteFile>;

    /// Delete a file
    async fn delete_file(&self, name: &str) -> ProviderResult<()>;

    /// Run a chat-style generation call
    async fn generate(&self, request: GenerationRequest) -> ProviderResult<GenerationResponse>;
}
