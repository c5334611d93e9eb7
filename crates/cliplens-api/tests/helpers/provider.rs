use async_trait::async_trait;
use cliplens_core::{
    FileState, GenerationRequest, GenerationResponse, ProviderError, ProviderResult, RemoteFile,
    VideoProvider, VideoUpload,
};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const FILE_NAME: &str = "files/ad-123";
pub const FILE_URI: &str = "https://generativelanguage.googleapis.com/v1beta/files/ad-123";

/// Provider double that records every call and replays scripted results.
pub struct RecordingProvider {
    states: Mutex<VecDeque<FileState>>,
    generation: Mutex<Option<ProviderResult<GenerationResponse>>>,
    calls: Mutex<Vec<String>>,
    uploads: Mutex<Vec<VideoUpload>>,
    requests: Mutex<Vec<GenerationRequest>>,
    deleted: Mutex<Vec<String>>,
}

impl RecordingProvider {
    /// File is ACTIVE on the first check and generation returns `text`.
    pub fn answering(text: &str) -> Self {
        Self::new(vec![FileState::Active], Ok(GenerationResponse::from_text(text)))
    }

    pub fn failing_generation(err: ProviderError) -> Self {
        Self::new(vec![FileState::Active], Err(err))
    }

    pub fn with_states(states: Vec<FileState>) -> Self {
        Self::new(states, Ok(GenerationResponse::from_text("unused")))
    }

    fn new(states: Vec<FileState>, generation: ProviderResult<GenerationResponse>) -> Self {
        Self {
            states: Mutex::new(states.into()),
            generation: Mutex::new(Some(generation)),
            calls: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<VideoUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
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
impl VideoProvider for RecordingProvider {
    async fn upload_file(&self, video: VideoUpload) -> ProviderResult<RemoteFile> {
        self.record("upload".to_string());
        self.uploads.lock().unwrap().push(video);
        Ok(self.file(FileState::Processing))
    }

    async fn get_file(&self, name: &str) -> ProviderResult<RemoteFile> {
        self.record(format!("get {}", name));
        let state = self
            .states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FileState::Active);
        Ok(self.file(state))
    }

    async fn delete_file(&self, name: &str) -> ProviderResult<()> {
        self.record(format!("delete {}", name));
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn generate(&self, request: GenerationRequest) -> ProviderResult<GenerationResponse> {
        self.record("generate".to_string());
        self.requests.lock().unwrap().push(request);
        self.generation
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(GenerationResponse::default()))
    }
}
