//! Video analysis pipeline
//!
//! Upload the video, wait until the provider has processed it, ask the model
//! for a critique, and remove the uploaded file again. The uploaded file is
//! owned by a `RemoteFileLease` from the moment the upload succeeds, so it is
//! deleted on every exit path.

mod lease;
mod polling;

pub use lease::RemoteFileLease;
pub use polling::{wait_until_processed, PollPolicy};

use cliplens_core::models::{analysis_message, seed_history};
use cliplens_core::{
    AppError, Config, FileState, GenerationConfig, GenerationRequest, ProviderError, RemoteFile,
    VideoProvider, VideoUpload,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("File processing failed")]
    ProcessingFailed { name: String, state: FileState },

    #[error("File processing timed out after {waited_secs}s")]
    ProcessingTimeout { name: String, waited_secs: u64 },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::ProcessingFailed { name, state } => AppError::FileProcessingFailed {
                name,
                state: state.to_string(),
            },
            AnalysisError::ProcessingTimeout { name, waited_secs } => {
                AppError::ProcessingTimeout { name, waited_secs }
            }
            AnalysisError::Provider(e) => e.into(),
        }
    }
}

/// Runs one analysis per call; shared by all requests.
#[derive(Clone)]
pub struct VideoAnalyzer {
    provider: Arc<dyn VideoProvider>,
    poll_policy: PollPolicy,
    generation_config: GenerationConfig,
}

impl VideoAnalyzer {
    pub fn new(
        provider: Arc<dyn VideoProvider>,
        poll_policy: PollPolicy,
        generation_config: GenerationConfig,
    ) -> Self {
        Self {
            provider,
            poll_policy,
            generation_config,
        }
    }

    pub fn from_config(provider: Arc<dyn VideoProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            PollPolicy::from_config(config),
            GenerationConfig::default(),
        )
    }

    /// Analyze a video and return the model's critique text.
    #[tracing::instrument(
        skip(self, video),
        fields(
            display_name = %video.display_name,
            mime_type = %video.mime_type,
            size_bytes = video.len(),
        )
    )]
    pub async fn analyze(&self, video: VideoUpload) -> Result<String, AnalysisError> {
        let uploaded = self.provider.upload_file(video).await?;
        let lease = RemoteFileLease::new(self.provider.clone(), uploaded.name.clone());

        match self.critique(&uploaded).await {
            Ok(analysis) => {
                lease.release().await?;
                tracing::info!(
                    file_name = %uploaded.name,
                    analysis_chars = analysis.len(),
                    "Video analysis completed"
                );
                Ok(analysis)
            }
            Err(e) => {
                tracing::debug!(
                    file_name = %lease.name(),
                    error = %e,
                    "Analysis failed, removing remote file"
                );
                lease.release_quietly().await;
                Err(e)
            }
        }
    }

    async fn critique(&self, uploaded: &RemoteFile) -> Result<String, AnalysisError> {
        let file =
            wait_until_processed(self.provider.as_ref(), &uploaded.name, &self.poll_policy).await?;

        if file.state != FileState::Active {
            tracing::warn!(
                file_name = %file.name,
                state = %file.state,
                provider_error = ?file.error.as_ref().and_then(|s| s.message.as_deref()),
                "File did not become active"
            );
            return Err(AnalysisError::ProcessingFailed {
                name: file.name,
                state: file.state,
            });
        }

        // Reference the polled handle: its URI and MIME type are authoritative.
        let request = GenerationRequest {
            history: seed_history(),
            message: analysis_message(&file),
            config: self.generation_config.clone(),
        };

        let response = self.provider.generate(request).await?;
        Ok(response.text()?)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use cliplens_core::{
        FileState, GenerationRequest, GenerationResponse, ProviderError, ProviderResult,
        RemoteFile, VideoProvider, VideoUpload,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::{Duration, Instant};

    pub const FILE_NAME: &str = "files/abc";
    pub const FILE_URI: &str = "https://example.test/v1beta/files/abc";

    /// In-memory provider that replays a script of file states.
    ///
    /// The last state repeats once the script runs out.
    pub struct ScriptedProvider {
        states: Mutex<VecDeque<FileState>>,
        last_state: Mutex<FileState>,
        generation: Mutex<Option<ProviderResult<GenerationResponse>>>,
        upload_error: Mutex<Option<ProviderError>>,
        delete_error: Mutex<Option<ProviderError>>,
        delete_delay: Mutex<Option<Duration>>,
        completed_deletes: Mutex<usize>,
        calls: Mutex<Vec<&'static str>>,
        fetched_at: Mutex<Vec<Instant>>,
        deleted: Mutex<Vec<String>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(states: Vec<FileState>) -> Self {
            let last_state = states.last().copied().unwrap_or(FileState::Active);
            Self {
                states: Mutex::new(states.into()),
                last_state: Mutex::new(last_state),
                generation: Mutex::new(None),
                upload_error: Mutex::new(None),
                delete_error: Mutex::new(None),
                delete_delay: Mutex::new(None),
                completed_deletes: Mutex::new(0),
                calls: Mutex::new(Vec::new()),
                fetched_at: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_generation_text(self, text: &str) -> Self {
            *self.generation.lock().unwrap() = Some(Ok(GenerationResponse::from_text(text)));
            self
        }

        pub fn with_generation_response(self, response: GenerationResponse) -> Self {
            *self.generation.lock().unwrap() = Some(Ok(response));
            self
        }

        pub fn with_generation_error(self, err: ProviderError) -> Self {
            *self.generation.lock().unwrap() = Some(Err(err));
            self
        }

        pub fn with_upload_error(self, err: ProviderError) -> Self {
            *self.upload_error.lock().unwrap() = Some(err);
            self
        }

        pub fn with_delete_error(self, err: ProviderError) -> Self {
            *self.delete_error.lock().unwrap() = Some(err);
            self
        }

        pub fn with_delete_delay(self, delay: Duration) -> Self {
            *self.delete_delay.lock().unwrap() = Some(delay);
            self
        }

        pub fn completed_deletes(&self) -> usize {
            *self.completed_deletes.lock().unwrap()
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn get_count(&self) -> usize {
            self.fetched_at.lock().unwrap().len()
        }

        pub fn fetch_offsets(&self, start: Instant) -> Vec<Duration> {
            self.fetched_at
                .lock()
                .unwrap()
                .iter()
                .map(|t| t.duration_since(start))
                .collect()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }

        pub fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn file(&self, state: FileState) -> RemoteFile {
            RemoteFile {
                name: FILE_NAME.to_string(),
                display_name: Some("ad.mp4".to_string()),
                mime_type: "video/mp4".to_string(),
                size_bytes: None,
                uri: FILE_URI.to_string(),
                state,
                expiration_time: None,
                error: None,
            }
        }
    }

    #[async_trait]
    impl VideoProvider for ScriptedProvider {
        async fn upload_file(&self, _video: VideoUpload) -> ProviderResult<RemoteFile> {
            self.calls.lock().unwrap().push("upload");
            if let Some(err) = self.upload_error.lock().unwrap().take() {
                return Err(err);
            }
            Ok(self.file(FileState::Processing))
        }

        async fn get_file(&self, _name: &str) -> ProviderResult<RemoteFile> {
            self.calls.lock().unwrap().push("get");
            self.fetched_at.lock().unwrap().push(Instant::now());
            let next = self.states.lock().unwrap().pop_front();
            let state = next.unwrap_or(*self.last_state.lock().unwrap());
            Ok(self.file(state))
        }

        async fn delete_file(&self, name: &str) -> ProviderResult<()> {
            self.calls.lock().unwrap().push("delete");
            self.deleted.lock().unwrap().push(name.to_string());
            let delay = *self.delete_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            *self.completed_deletes.lock().unwrap() += 1;
            match self.delete_error.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn generate(&self, request: GenerationRequest) -> ProviderResult<GenerationResponse> {
            self.calls.lock().unwrap().push("generate");
            self.requests.lock().unwrap().push(request);
            self.generation
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(GenerationResponse::from_text("analysis")))
        }
    }
}
