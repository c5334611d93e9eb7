//! Waiting for the provider to finish processing an upload.

use cliplens_core::{Config, RemoteFile, VideoProvider};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use super::AnalysisError;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// How often to re-fetch a processing file, and for how long at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` waits forever.
    pub max_wait: Option<Duration>,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Option<Duration>) -> Self {
        Self { interval, max_wait }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.poll_interval(), config.processing_timeout())
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, Some(DEFAULT_MAX_WAIT))
    }
}

/// Fetch `name` until its state is terminal and return the last fetched handle.
///
/// The first fetch happens immediately; every later fetch is preceded by one
/// `interval` sleep. Fails with `ProcessingTimeout` instead of sleeping past
/// `max_wait`.
pub async fn wait_until_processed(
    provider: &dyn VideoProvider,
    name: &str,
    policy: &PollPolicy,
) -> Result<RemoteFile, AnalysisError> {
    let started = Instant::now();
    let mut fetches: u32 = 1;
    let mut file = provider.get_file(name).await?;

    while !file.state.is_terminal() {
        let waited = started.elapsed();
        if let Some(max_wait) = policy.max_wait {
            if waited + policy.interval > max_wait {
                tracing::warn!(
                    file_name = %name,
                    fetches,
                    waited_secs = waited.as_secs(),
                    "Gave up waiting for file processing"
                );
                return Err(AnalysisError::ProcessingTimeout {
                    name: name.to_string(),
                    waited_secs: waited.as_secs(),
                });
            }
        }

        tracing::debug!(
            file_name = %name,
            fetches,
            interval_secs = policy.interval.as_secs(),
            "File still processing"
        );
        sleep(policy.interval).await;

        file = provider.get_file(name).await?;
        fetches += 1;
    }

    tracing::debug!(file_name = %name, state = %file.state, fetches, "File processing finished");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::test_support::ScriptedProvider;
    use cliplens_core::FileState;

    #[tokio::test(start_paused = true)]
    async fn test_active_on_first_fetch_does_not_sleep() {
        let provider = ScriptedProvider::new(vec![FileState::Active]);
        let start = Instant::now();

        let file = wait_until_processed(&provider, "files/abc", &PollPolicy::default())
            .await
            .unwrap();

        assert_eq!(file.state, FileState::Active);
        assert_eq!(provider.get_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_results_are_refetched_after_interval() {
        let provider = ScriptedProvider::new(vec![
            FileState::Processing,
            FileState::Processing,
            FileState::Processing,
            FileState::Active,
        ]);
        let start = Instant::now();

        let file = wait_until_processed(&provider, "files/abc", &PollPolicy::default())
            .await
            .unwrap();

        assert_eq!(file.state, FileState::Active);
        assert_eq!(provider.get_count(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(15));
        assert_eq!(
            provider.fetch_offsets(start),
            vec![
                Duration::ZERO,
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(15)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_state_is_returned_not_retried() {
        let provider = ScriptedProvider::new(vec![FileState::Processing, FileState::Failed]);

        let file = wait_until_processed(&provider, "files/abc", &PollPolicy::default())
            .await
            .unwrap();

        assert_eq!(file.state, FileState::Failed);
        assert_eq!(provider.get_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_before_sleeping_past_max_wait() {
        let provider = ScriptedProvider::new(vec![FileState::Processing]);
        let policy = PollPolicy::new(Duration::from_secs(5), Some(Duration::from_secs(12)));

        let err = wait_until_processed(&provider, "files/abc", &policy)
            .await
            .unwrap_err();

        match err {
            AnalysisError::ProcessingTimeout { name, waited_secs } => {
                assert_eq!(name, "files/abc");
                assert_eq!(waited_secs, 10);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Fetches at 0s, 5s and 10s; a fourth would land at 15s.
        assert_eq!(provider.get_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_policy_keeps_waiting() {
        let mut states = vec![FileState::Processing; 200];
        states.push(FileState::Active);
        let provider = ScriptedProvider::new(states);
        let policy = PollPolicy::new(Duration::from_secs(5), None);

        let file = wait_until_processed(&provider, "files/abc", &policy)
            .await
            .unwrap();

        assert_eq!(file.state, FileState::Active);
        assert_eq!(provider.get_count(), 201);
    }
}
