//! Trait seam for the backend client.
//!
//! The poller and the actions only ever see `Arc<dyn BackendApi>`, so tests
//! can substitute [`mocks::MockBackend`] for the real HTTP client.

use async_trait::async_trait;

use super::{ApiError, BackendClient, PollOutcome};
use crate::actions::{ConfirmRequest, ReportRequest};

/// Everything the app needs from the backend.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Poll for the current playback update. `refresh` forces the backend to
    /// re-resolve the track instead of answering "no updates".
    async fn fetch_update(&self, refresh: bool) -> Result<PollOutcome, ApiError>;

    async fn confirm_anime(&self, request: &ConfirmRequest) -> Result<String, ApiError>;

    async fn report(&self, request: &ReportRequest) -> Result<String, ApiError>;

    /// URL to open in the browser when the session is missing.
    fn login_url(&self) -> String;
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn fetch_update(&self, refresh: bool) -> Result<PollOutcome, ApiError> {
        self.fetch_update(refresh).await
    }

    async fn confirm_anime(&self, request: &ConfirmRequest) -> Result<String, ApiError> {
        self.confirm_anime(request).await
    }

    async fn report(&self, request: &ReportRequest) -> Result<String, ApiError> {
        self.report(request).await
    }

    fn login_url(&self) -> String {
        self.login_url()
    }
}

/// Scripted backend for tests.
#[cfg(test)]
pub mod mocks {
    use std::collections::VecDeque;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;

    /// One recorded call against the mock.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Fetch { refresh: bool },
        Confirm(ConfirmRequest),
        Report(ReportRequest),
    }

    /// Mock backend that replays scripted update responses.
    ///
    /// Once the script runs dry every fetch answers `fallback`.
    pub struct MockBackend {
        script: Mutex<VecDeque<Result<PollOutcome, ApiError>>>,
        /// Per-fetch latency, consumed in order (zero once exhausted)
        delays: Mutex<VecDeque<Duration>>,
        fallback: PollOutcome,
        action_error: Option<ApiError>,
        /// Fetches left that panic instead of answering
        panics: Mutex<usize>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockBackend {
        /// Create a mock that always answers "no updates".
        pub fn idle() -> Self {
            Self::scripted(Vec::new())
        }

        /// Create a mock that replays `responses` in order.
        pub fn scripted(responses: Vec<Result<PollOutcome, ApiError>>) -> Self {
            Self {
                script: Mutex::new(responses.into()),
                delays: Mutex::new(VecDeque::new()),
                fallback: PollOutcome::NoUpdate,
                action_error: None,
                panics: Mutex::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Answer `outcome` once the script is exhausted.
        pub fn with_fallback(mut self, outcome: PollOutcome) -> Self {
            self.fallback = outcome;
            self
        }

        /// Delay successive fetches by these durations.
        pub fn with_delays(self, delays: Vec<Duration>) -> Self {
            *self.delays.lock() = delays.into();
            self
        }

        /// Panic inside the first `count` fetches.
        pub fn with_panicking_fetches(self, count: usize) -> Self {
            *self.panics.lock() = count;
            self
        }

        /// Make confirm/report fail with `error`.
        pub fn with_action_error(mut self, error: ApiError) -> Self {
            self.action_error = Some(error);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        /// Recorded fetches, as their `refresh` flags.
        pub fn fetches(&self) -> Vec<bool> {
            self.calls
                .lock()
                .iter()
                .filter_map(|c| match c {
                    Call::Fetch { refresh } => Some(*refresh),
                    _ => None,
                })
                .collect()
        }

        fn action_result(&self, call: Call) -> Result<String, ApiError> {
            self.calls.lock().push(call);
            match &self.action_error {
                Some(err) => Err(err.clone()),
                None => Ok("ok".to_string()),
            }
        }
    }

    #[async_trait]
    impl BackendApi for MockBackend {
        async fn fetch_update(&self, refresh: bool) -> Result<PollOutcome, ApiError> {
            self.calls.lock().push(Call::Fetch { refresh });
            let delay = self.delays.lock().pop_front();
            {
                let mut panics = self.panics.lock();
                if *panics > 0 {
                    *panics -= 1;
                    drop(panics);
                    panic!("scripted fetch panic");
                }
            }
            let response = self.script.lock().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response.unwrap_or_else(|| Ok(self.fallback.clone()))
        }

        async fn confirm_anime(&self, request: &ConfirmRequest) -> Result<String, ApiError> {
            self.action_result(Call::Confirm(request.clone()))
        }

        async fn report(&self, request: &ReportRequest) -> Result<String, ApiError> {
            self.action_result(Call::Report(request.clone()))
        }

        fn login_url(&self) -> String {
            "http://mock.local/api/login".to_string()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_replays_script_then_fallback() {
            let mock = MockBackend::scripted(vec![
                Ok(PollOutcome::NotPlaying),
                Err(ApiError::Network("timeout".to_string())),
            ]);
            assert_eq!(mock.fetch_update(true).await.unwrap(), PollOutcome::NotPlaying);
            assert!(matches!(
                mock.fetch_update(false).await,
                Err(ApiError::Network(_))
            ));
            assert_eq!(mock.fetch_update(false).await.unwrap(), PollOutcome::NoUpdate);
            assert_eq!(mock.fetches(), vec![true, false, false]);
        }

        #[tokio::test]
        async fn test_mock_action_error() {
            let mock = MockBackend::idle()
                .with_action_error(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            let request = ReportRequest {
                spotify_id: "t".to_string(),
                ann_song_id: 1,
                reason: "wrong".to_string(),
            };
            assert!(mock.report(&request).await.is_err());
            assert_eq!(mock.calls(), vec![Call::Report(request)]);
        }
    }
}
