//! Ownership of an uploaded provider file.
//!
//! A `RemoteFileLease` is taken right after a successful upload. The file is
//! deleted when the lease is released, or in the background if the lease is
//! dropped unreleased (for example when axum drops the handler future because
//! the client went away).

use cliplens_core::{ProviderError, ProviderResult, VideoProvider};
use std::sync::Arc;

pub struct RemoteFileLease {
    provider: Arc<dyn VideoProvider>,
    name: String,
    released: bool,
}

impl RemoteFileLease {
    pub fn new(provider: Arc<dyn VideoProvider>, name: impl Into<String>) -> Self {
        Self {
            provider,
            name: name.into(),
            released: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delete the file and report the outcome.
    ///
    /// The delete runs on its own task, so it completes even if the caller is
    /// cancelled while waiting for it.
    pub async fn release(self) -> ProviderResult<()> {
        let name = self.name.clone();
        let result = self.spawn_delete().await;

        match &result {
            Ok(()) => tracing::debug!(file_name = %name, "Released remote file"),
            Err(e) => tracing::warn!(
                file_name = %name,
                error = %e,
                "Failed to delete remote file"
            ),
        }
        result
    }

    /// Delete the file, logging a failure instead of returning it.
    pub async fn release_quietly(self) {
        let name = self.name.clone();
        if let Err(e) = self.spawn_delete().await {
            tracing::warn!(
                file_name = %name,
                error = %e,
                "Failed to delete remote file during error cleanup"
            );
        }
    }

    async fn spawn_delete(mut self) -> ProviderResult<()> {
        self.released = true;
        let provider = self.provider.clone();
        let name = self.name.clone();

        tokio::spawn(async move { provider.delete_file(&name).await })
            .await
            .map_err(|e| ProviderError::Transport(format!("Delete task failed: {}", e)))?
    }
}

impl Drop for RemoteFileLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let provider = self.provider.clone();
        let name = std::mem::take(&mut self.name);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(file_name = %name, "Remote file lease dropped, deleting in background");
                handle.spawn(async move {
                    if let Err(e) = provider.delete_file(&name).await {
                        tracing::warn!(
                            file_name = %name,
                            error = %e,
                            "Background delete of remote file failed"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::error!(file_name = %name, "No runtime to delete remote file; it will expire on the provider");
            }
        }
    }
}
