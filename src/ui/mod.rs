//! UI module for Anisong Radar.

mod messages;
mod state;
mod streams;
pub mod theme;
mod views;

use std::sync::Arc;

use iced::widget::{column, container, text};
use iced::{Element, Length, Subscription, Task, Theme};

pub use messages::Message;
use state::{AppState, ImageState, RadarState, ReportForm, StatusLine};

use crate::actions::{self, ConfirmRequest, ReportRequest};
use crate::api::{BackendApi, BackendClient};
use crate::config::{self, Config};
use crate::poller::PollerEvent;
use crate::presenter::Filters;

pub struct AnisongRadar {
    state: AppState,
    /// `--server` from the command line, applied over every loaded config
    server_override: Option<String>,
}

impl AnisongRadar {
    pub fn new(server_override: Option<String>) -> (Self, Task<Message>) {
        tracing::debug!("UI::new() started");
        (
            Self {
                state: AppState::Loading,
                server_override,
            },
            load_config(),
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let AppState::Ready(s) = &self.state else {
            return Subscription::none();
        };

        // Removing this subscription drops the stream and stops the poller
        if s.polling_active {
            Subscription::run_with_id(
                "backend-poller",
                streams::poll_stream(Arc::clone(&s.api), s.poller_config.clone()),
            )
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match &self.state {
            AppState::Loading => text("Loading settings...").size(30).into(),
            AppState::Ready(s) => return views::radar_view(s),
            AppState::Error(e) => column![
                text(format!("Error: {}", e))
                    .size(24)
                    .color(theme::color::ERROR),
                text("Fix the server settings in the config file, then restart.")
                    .size(14)
                    .color(theme::color::TEXT_SECONDARY),
            ]
            .spacing(theme::spacing::MD)
            .into(),
        };
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::ImageLoaded(..)) {
            tracing::trace!(target: "ui::update", message = ?message, "Update received");
        }

        // Messages that work regardless of state
        match message {
            Message::ConfigLoaded(config) => return self.connect(config),
            Message::LinkPressed(url) => {
                open_in_browser(&url);
                return Task::none();
            }
            _ => {}
        }

        let AppState::Ready(s) = &mut self.state else {
            return Task::none();
        };

        match message {
            Message::ConfigLoaded(_) | Message::LinkPressed(_) => Task::none(),

            Message::Reconnect => {
                if s.polling_active {
                    return Task::none();
                }
                s.status = Some(StatusLine::info("Reconnecting..."));
                load_config()
            }

            // Poller
            Message::PollerReady(handle) => {
                tracing::debug!(target: "ui::poller", "Poller running");
                s.poller = Some(handle);
                Task::none()
            }
            Message::Poller(event) => handle_poller_event(s, event),
            Message::PollerStopped => {
                tracing::warn!(target: "ui::poller", "Poller stopped unexpectedly");
                s.poller = None;
                s.polling_active = false;
                s.status = Some(StatusLine::error("Polling stopped."));
                Task::none()
            }
            Message::RefreshPressed => {
                if let Some(handle) = &s.poller {
                    handle.refresh_now();
                }
                Task::none()
            }

            // Filters
            Message::FilterToggled(flag, enabled) => {
                s.filters = s.filters.with(flag, enabled);
                apply_filters(&mut s.config, s.filters);
                Task::perform(config::save_async(s.config.clone()), |result| {
                    Message::ConfigSaved(result.map_err(|e| e.to_string()))
                })
            }
            Message::ConfigSaved(Ok(path)) => {
                tracing::debug!("Saved filter settings to {}", path.display());
                Task::none()
            }
            Message::ConfigSaved(Err(e)) => {
                tracing::warn!("Could not save settings: {}", e);
                s.status = Some(StatusLine::warning(format!("Could not save settings: {e}")));
                Task::none()
            }

            // Confirm
            Message::ConfirmPressed(anime) => {
                let Some(request) = ConfirmRequest::for_match(&s.playback, &anime) else {
                    s.status = Some(StatusLine::warning("No current track to confirm."));
                    return Task::none();
                };
                s.confirming = true;
                s.status = Some(StatusLine::info(format!(
                    "Confirmed '{}'.",
                    request.song_name
                )));
                let poller = s.poller.clone();
                Task::perform(
                    actions::submit_confirm(Arc::clone(&s.api), request, move || {
                        if let Some(handle) = poller {
                            handle.refresh_now();
                        }
                        Message::ConfirmFinished
                    }),
                    std::convert::identity,
                )
            }
            Message::ConfirmFinished => {
                s.confirming = false;
                Task::none()
            }

            // Report
            Message::ReportOpened(anime) => {
                s.report = Some(ReportForm::new(anime));
                Task::none()
            }
            Message::ReportReasonChanged(reason) => {
                if let Some(form) = &mut s.report {
                    form.reason = reason;
                }
                Task::none()
            }
            Message::ReportSubmitted => submit_report(s),
            Message::ReportCancelled => {
                s.report = None;
                Task::none()
            }
            Message::ReportFinished(ann_song_id) => {
                let own_form = s
                    .report
                    .as_ref()
                    .is_some_and(|f| f.sending && f.anime.ann_song_id == Some(ann_song_id));
                if own_form {
                    s.report = None;
                }
                Task::none()
            }

            // Pictures
            Message::ImageLoaded(url, result) => {
                if let Some(slot) = s.images.get_mut(&url) {
                    *slot = match result {
                        Ok(handle) => ImageState::Ready(handle),
                        Err(e) => {
                            tracing::debug!(target: "ui::images", "No picture for {}: {}", url, e);
                            ImageState::Failed
                        }
                    };
                }
                Task::none()
            }

            Message::OpenLogin => {
                if let Some(url) = &s.login_url {
                    open_in_browser(url);
                }
                Task::none()
            }
        }
    }

    /// Build the backend client from a freshly loaded config and start polling.
    fn connect(&mut self, config: Config) -> Task<Message> {
        let config = config.with_server_override(self.server_override.as_deref());
        match BackendClient::from_config(&config.server) {
            Ok(client) => {
                tracing::info!("Connecting to {}", client.base_url());
                let api: Arc<dyn BackendApi> = Arc::new(client);
                self.state = AppState::Ready(Box::new(RadarState::new(config, api)));
            }
            Err(e) => {
                tracing::error!("Invalid server settings: {}", e);
                self.state = AppState::Error(e.to_string());
            }
        }
        Task::none()
    }
}

fn load_config() -> Task<Message> {
    Task::perform(
        async {
            tokio::task::spawn_blocking(config::load)
                .await
                .unwrap_or_default()
        },
        Message::ConfigLoaded,
    )
}

fn handle_poller_event(s: &mut RadarState, event: PollerEvent) -> Task<Message> {
    match event {
        PollerEvent::StateChanged(playback) => {
            s.playback = playback;
            s.status = None;
            let missing = s.sync_images();
            Task::batch(missing.into_iter().map(|url| {
                let client = s.http.clone();
                let key = url.clone();
                Task::perform(streams::fetch_image(client, url), move |result| {
                    Message::ImageLoaded(key.clone(), result)
                })
            }))
        }
        PollerEvent::LoginRequired { login_url } => {
            tracing::info!(target: "ui::poller", "Login required, opening {}", login_url);
            s.polling_active = false;
            s.poller = None;
            s.status = None;
            open_in_browser(&login_url);
            s.login_url = Some(login_url);
            Task::none()
        }
        PollerEvent::PollFailed(e) => {
            s.status = Some(StatusLine::warning(format!("Poll failed: {e}")));
            Task::none()
        }
    }
}

fn submit_report(s: &mut RadarState) -> Task<Message> {
    let Some(form) = &mut s.report else {
        return Task::none();
    };
    if !form.can_submit() {
        return Task::none();
    }
    let Some(track_id) = s.playback.current_track_id.clone() else {
        s.status = Some(StatusLine::warning("No current track to report against."));
        s.report = None;
        return Task::none();
    };
    let Some(request) = ReportRequest::new(track_id, &form.anime, form.reason.trim()) else {
        s.status = Some(StatusLine::warning("This entry has no song id to report."));
        s.report = None;
        return Task::none();
    };

    form.sending = true;
    let ann_song_id = request.ann_song_id;
    Task::perform(
        actions::submit_report(Arc::clone(&s.api), request, move || {
            Message::ReportFinished(ann_song_id)
        }),
        std::convert::identity,
    )
}

fn apply_filters(config: &mut Config, filters: Filters) {
    config.display.show_openings = filters.contains(Filters::OPENING);
    config.display.show_inserts = filters.contains(Filters::INSERT);
    config.display.show_endings = filters.contains(Filters::ENDING);
}

fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("Could not open {}: {}", url, e);
    }
}
