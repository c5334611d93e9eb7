//! ClipLens API Library
//!
//! HTTP surface of the video analysis service: routes, handlers, the analysis
//! pipeline and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use middleware::RequestId;
pub use services::analysis::{AnalysisError, PollPolicy, RemoteFileLease, VideoAnalyzer};
pub use state::AppState;
