//! Domain models

pub mod analysis;
pub mod conversation;
pub mod file;
pub mod generation;

pub use analysis::{AnalysisResponse, ErrorBody};
pub use conversation::{analysis_message, seed_history, Content, FileData, Part, Role};
pub use file::{FileState, FileStatus, RemoteFile};
pub use generation::{
    Candidate, GenerationConfig, GenerationRequest, GenerationResponse, PromptFeedback,
    UsageMetadata,
};
