//! Async streams and fetches for background work (polling, pictures).

use std::sync::Arc;

use iced::widget::image;
use tokio::sync::mpsc;

use super::messages::Message;
use crate::api::BackendApi;
use crate::poller::{PollerConfig, PollerEvent, spawn_poller};

/// Create a stream that runs the backend poller and forwards its events.
///
/// Dropping the stream drops the event receiver, which stops the poller task.
pub fn poll_stream(
    api: Arc<dyn BackendApi>,
    config: PollerConfig,
) -> impl futures::Stream<Item = Message> {
    futures::stream::unfold(PollStreamState::Init { api, config }, |state| async move {
        match state {
            PollStreamState::Init { api, config } => {
                tracing::info!(
                    target: "ui::poller",
                    "Starting poller ({}s interval)",
                    config.interval.as_secs()
                );
                let (handle, events) = spawn_poller(api, config);
                Some((
                    Message::PollerReady(handle),
                    PollStreamState::Running { events },
                ))
            }
            PollStreamState::Running { mut events } => match events.recv().await {
                Some(event @ PollerEvent::LoginRequired { .. }) => {
                    Some((Message::Poller(event), PollStreamState::Done))
                }
                Some(event) => Some((Message::Poller(event), PollStreamState::Running { events })),
                None => {
                    tracing::debug!(target: "ui::poller", "Poller event channel closed");
                    Some((Message::PollerStopped, PollStreamState::Done))
                }
            },
            PollStreamState::Done => None,
        }
    })
}

/// Internal state machine for the poll stream
enum PollStreamState {
    Init {
        api: Arc<dyn BackendApi>,
        config: PollerConfig,
    },
    Running {
        events: mpsc::Receiver<PollerEvent>,
    },
    Done,
}

/// Download a picture for the image widget
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<image::Handle, String> {
    let response = client.get(&url).send().await.map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status.as_u16()));
    }

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    if bytes.is_empty() {
        return Err("empty body".to_string());
    }

    Ok(image::Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;

    use super::*;
    use crate::api::PollOutcome;
    use crate::api::traits::mocks::MockBackend;

    #[tokio::test(start_paused = true)]
    async fn test_poll_stream_reports_ready_then_state() {
        let api = Arc::new(MockBackend::scripted(vec![Ok(PollOutcome::NotPlaying)]));
        let mut stream = Box::pin(poll_stream(api, PollerConfig::default()));

        // Holding the handle keeps the command channel open
        let Some(Message::PollerReady(_handle)) = stream.next().await else {
            panic!("expected PollerReady first");
        };
        assert!(matches!(
            stream.next().await,
            Some(Message::Poller(PollerEvent::StateChanged(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stream_ends_after_login_required() {
        let api = Arc::new(MockBackend::scripted(vec![Ok(PollOutcome::LoginRequired)]));
        let mut stream = Box::pin(poll_stream(api, PollerConfig::default()));

        // Holding the handle keeps the command channel open
        let Some(Message::PollerReady(_handle)) = stream.next().await else {
            panic!("expected PollerReady first");
        };
        assert!(matches!(
            stream.next().await,
            Some(Message::Poller(PollerEvent::LoginRequired { .. }))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_stream_stops_poller() {
        let mock = Arc::new(MockBackend::idle());
        let api: Arc<dyn BackendApi> = mock.clone();
        let mut stream = Box::pin(poll_stream(api, PollerConfig::default()));

        let Some(Message::PollerReady(handle)) = stream.next().await else {
            panic!("expected PollerReady first");
        };
        drop(stream);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(!handle.is_running());
        let polls = mock.fetches().len();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(mock.fetches().len(), polls);
    }
}
