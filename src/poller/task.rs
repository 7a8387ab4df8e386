//! Background poll driver.
//!
//! One tokio task owns the [`PollCycle`], a single re-armable timer and the
//! set of in-flight requests. Consumers talk to it through a
//! [`PollerHandle`] and read [`PollerEvent`]s from a channel.
//!
//! # Usage
//!
//! ```ignore
//! let (handle, mut events) = spawn_poller(api, PollerConfig::default());
//! while let Some(event) = events.recv().await {
//!     // render
//! }
//! ```
//!
//! Teardown: `handle.shutdown()`, dropping every handle, or dropping the
//! event receiver. Any of them cancels the pending timer and aborts requests
//! still in flight, so no fetch happens afterwards.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use super::cycle::{Phase, PollCycle, PollEffect, PollRequest};
use crate::api::{ApiError, BackendApi, PollOutcome};
use crate::config::PollingConfig;
use crate::model::PlaybackState;

/// Buffered events before the poller waits on a slow consumer.
const EVENT_BUFFER: usize = 32;

/// Poller settings.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between a cycle response and the next cycle poll (default: 5 seconds)
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
        }
    }
}

impl From<&PollingConfig> for PollerConfig {
    fn from(polling: &PollingConfig) -> Self {
        Self {
            interval: polling.interval(),
        }
    }
}

/// Commands that can be sent to the poller.
#[derive(Debug)]
enum PollerCommand {
    /// Issue a forced poll now
    RefreshNow,
    Shutdown,
}

/// Events emitted by the poller.
#[derive(Debug, Clone)]
pub enum PollerEvent {
    /// A new playback state replaced the old one
    StateChanged(PlaybackState),
    /// The session is gone; the poller has stopped
    LoginRequired { login_url: String },
    /// A poll failed; the cycle carries on
    PollFailed(String),
}

/// Cheap, cloneable control handle for a running poller.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    commands: mpsc::UnboundedSender<PollerCommand>,
}

impl PollerHandle {
    /// Poll right away with a forced refresh, outside the schedule.
    pub fn refresh_now(&self) {
        if self.commands.send(PollerCommand::RefreshNow).is_err() {
            tracing::debug!(target: "poller", "Refresh requested after poller stopped");
        }
    }

    /// Stop the poller. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.commands.send(PollerCommand::Shutdown);
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }
}

/// Start polling `api` in a background task.
///
/// Must be called from within a tokio runtime.
pub fn spawn_poller(
    api: Arc<dyn BackendApi>,
    config: PollerConfig,
) -> (PollerHandle, mpsc::Receiver<PollerEvent>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

    tokio::spawn(run(api, config, command_rx, event_tx));

    (
        PollerHandle {
            commands: command_tx,
        },
        event_rx,
    )
}

type Finished = (PollRequest, Result<PollOutcome, ApiError>);

fn dispatch(inflight: &mut JoinSet<Finished>, api: &Arc<dyn BackendApi>, request: PollRequest) {
    let api = Arc::clone(api);
    tracing::debug!(
        target: "poller",
        "Poll {} ({:?}, refresh={})",
        request.seq,
        request.origin,
        request.refresh
    );
    // A panicking request still reports back, so the cycle re-arms
    inflight.spawn(async move {
        let result = AssertUnwindSafe(api.fetch_update(request.refresh))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ApiError::Network("poll request panicked".to_string())));
        (request, result)
    });
}

/// Main run loop.
async fn run(
    api: Arc<dyn BackendApi>,
    config: PollerConfig,
    mut commands: mpsc::UnboundedReceiver<PollerCommand>,
    events: mpsc::Sender<PollerEvent>,
) {
    let mut cycle = PollCycle::new();
    let mut inflight: JoinSet<Finished> = JoinSet::new();

    let timer = tokio::time::sleep(config.interval);
    tokio::pin!(timer);
    let mut armed = false;

    tracing::info!(
        target: "poller",
        "Poller started (interval {:?})",
        config.interval
    );

    if let Some(request) = cycle.start() {
        dispatch(&mut inflight, &api, request);
    }

    'run: loop {
        tokio::select! {
            () = &mut timer, if armed => {
                armed = false;
                if let Some(request) = cycle.on_timer() {
                    dispatch(&mut inflight, &api, request);
                }
            }

            Some(joined) = inflight.join_next() => {
                let (request, result) = match joined {
                    Ok(finished) => finished,
                    Err(e) => {
                        tracing::error!(target: "poller", "Poll task failed: {}", e);
                        continue;
                    }
                };

                for effect in cycle.on_response(request, result) {
                    let event = match effect {
                        PollEffect::ArmTimer => {
                            timer.as_mut().reset(Instant::now() + config.interval);
                            armed = true;
                            continue;
                        }
                        PollEffect::StateChanged(state) => PollerEvent::StateChanged(state),
                        PollEffect::LoginRequired => PollerEvent::LoginRequired {
                            login_url: api.login_url(),
                        },
                        PollEffect::Failed(message) => PollerEvent::PollFailed(message),
                    };
                    if events.send(event).await.is_err() {
                        break 'run;
                    }
                }

                if cycle.phase() == Phase::Stopped {
                    break 'run;
                }
            }

            command = commands.recv() => match command {
                Some(PollerCommand::RefreshNow) => {
                    if let Some(request) = cycle.manual_refresh() {
                        dispatch(&mut inflight, &api, request);
                    }
                }
                Some(PollerCommand::Shutdown) | None => break 'run,
            },

            () = events.closed() => break 'run,
        }
    }

    cycle.stop();
    inflight.abort_all();
    tracing::info!(target: "poller", "Poller stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::mocks::MockBackend;
    use crate::model::NOT_PLAYING_TITLE;
    use crate::test_utils::{mock_anime_match, mock_song};

    fn config() -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(5),
        }
    }

    fn start(mock: &Arc<MockBackend>) -> (PollerHandle, mpsc::Receiver<PollerEvent>) {
        let api: Arc<dyn BackendApi> = mock.clone();
        spawn_poller(api, config())
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_schedule() {
        let mock = Arc::new(MockBackend::idle());
        let (_handle, _events) = start(&mock);

        tokio::time::sleep(Duration::from_millis(11_000)).await;

        // t=0 forced, then t=5 and t=10
        assert_eq!(mock.fetches(), vec![true, false, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_playing_event() {
        let mock = Arc::new(MockBackend::scripted(vec![Ok(PollOutcome::NotPlaying)]));
        let (_handle, mut events) = start(&mock);

        let Some(PollerEvent::StateChanged(state)) = events.recv().await else {
            panic!("expected state change");
        };
        assert_eq!(
            state.song_info.map(|s| s.title),
            Some(NOT_PLAYING_TITLE.to_string())
        );
        assert!(state.primary_matches.is_empty());
        assert!(!state.confirm_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_while_armed_stops_fetching() {
        let mock = Arc::new(MockBackend::scripted(vec![Ok(PollOutcome::NotPlaying)]));
        let (handle, mut events) = start(&mock);

        assert!(matches!(
            events.recv().await,
            Some(PollerEvent::StateChanged(_))
        ));
        handle.shutdown();
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(mock.fetches(), vec![true]);
        assert!(events.recv().await.is_none());
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_receiver_stops_fetching() {
        let mock = Arc::new(MockBackend::idle());
        let (_handle, events) = start(&mock);

        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(events);
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(mock.fetches(), vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_cycle_alive() {
        let mock = Arc::new(MockBackend::scripted(vec![
            Err(ApiError::Network("connection refused".into())),
            Ok(PollOutcome::NotPlaying),
        ]));
        let (_handle, mut events) = start(&mock);

        assert!(matches!(
            events.recv().await,
            Some(PollerEvent::PollFailed(_))
        ));
        assert!(matches!(
            events.recv().await,
            Some(PollerEvent::StateChanged(_))
        ));
        assert_eq!(mock.fetches(), vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_adds_no_timer() {
        let mock = Arc::new(MockBackend::idle());
        let (handle, _events) = start(&mock);

        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.refresh_now();
        tokio::time::sleep(Duration::from_secs(10)).await;

        // t=0 forced, t=1 manual, t=5 and t=10 from the one timer
        assert_eq!(mock.fetches(), vec![true, true, false, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_discarded() {
        let mock = Arc::new(
            MockBackend::scripted(vec![
                Ok(PollOutcome::NotPlaying),
                Ok(PollOutcome::Miss {
                    song: mock_song(),
                    track_id: Some("old".into()),
                    possible: vec![],
                }),
                Ok(PollOutcome::Hit {
                    song: mock_song(),
                    track_id: Some("new".into()),
                    certainty: 99,
                    matches: vec![mock_anime_match("A")],
                    more_by_artist: vec![],
                }),
            ])
            .with_delays(vec![
                Duration::ZERO,
                Duration::from_secs(3),
                Duration::ZERO,
            ]),
        );
        let (handle, mut events) = start(&mock);
        assert!(matches!(
            events.recv().await,
            Some(PollerEvent::StateChanged(_))
        ));

        // Manual poll at t=4 answers at t=7, after the t=5 cycle poll landed
        tokio::time::sleep(Duration::from_secs(4)).await;
        handle.refresh_now();

        let Some(PollerEvent::StateChanged(state)) = events.recv().await else {
            panic!("expected hit");
        };
        assert_eq!(state.current_track_id.as_deref(), Some("new"));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(events.try_recv().is_err());
        assert_eq!(mock.fetches(), vec![true, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_required_is_terminal() {
        let mock = Arc::new(MockBackend::scripted(vec![Ok(PollOutcome::LoginRequired)]));
        let (_handle, mut events) = start(&mock);

        let Some(PollerEvent::LoginRequired { login_url }) = events.recv().await else {
            panic!("expected login");
        };
        assert_eq!(login_url, "http://mock.local/api/login");
        assert!(events.recv().await.is_none());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(mock.fetches(), vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_request_keeps_cycle_alive() {
        let mock = Arc::new(
            MockBackend::idle()
                .with_panicking_fetches(1)
                .with_fallback(PollOutcome::NotPlaying),
        );
        let (_handle, mut events) = start(&mock);

        let Some(PollerEvent::PollFailed(message)) = events.recv().await else {
            panic!("expected the panic to surface as a failure");
        };
        assert!(message.contains("panicked"));

        assert!(matches!(
            events.recv().await,
            Some(PollerEvent::StateChanged(_))
        ));

        tokio::time::sleep(Duration::from_secs(26)).await;
        // t=0 panics, then t=5 .. t=30
        assert_eq!(mock.fetches().len(), 7);
    }

    #[test]
    fn test_config_from_settings() {
        let polling = PollingConfig { interval_secs: 9 };
        assert_eq!(PollerConfig::from(&polling).interval, Duration::from_secs(9));
    }
}
