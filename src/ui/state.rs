//! Application state types for the Anisong Radar UI.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use iced::widget::image;

use crate::api::BackendApi;
use crate::config::Config;
use crate::model::{AnimeMatch, PlaybackState};
use crate::poller::{PollerConfig, PollerHandle};
use crate::presenter::Filters;

/// Top-level application state
///
/// Note: RadarState is boxed to reduce stack size (Clippy large_enum_variant)
pub enum AppState {
    Loading,
    Ready(Box<RadarState>),
    Error(String),
}

/// A fetched (or failed) picture, keyed by URL in [`RadarState::images`]
#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Ready(image::Handle),
    /// Views fall back to a text placeholder
    Failed,
}

/// The open report pop-up
#[derive(Debug, Clone)]
pub struct ReportForm {
    pub anime: AnimeMatch,
    pub reason: String,
    pub sending: bool,
}

impl ReportForm {
    pub fn new(anime: AnimeMatch) -> Self {
        Self {
            anime,
            reason: String::new(),
            sending: false,
        }
    }

    /// Whether the submit button should be live
    pub fn can_submit(&self) -> bool {
        !self.sending && !self.reason.trim().is_empty()
    }
}

/// Severity of the status line under the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// State for a connected application
pub struct RadarState {
    pub config: Config,
    pub filters: Filters,
    pub api: Arc<dyn BackendApi>,
    pub poller_config: PollerConfig,
    /// Set once the poll subscription has started its task
    pub poller: Option<PollerHandle>,
    /// Drives the poll subscription; clearing it tears the poller down
    pub polling_active: bool,
    pub playback: PlaybackState,
    pub report: Option<ReportForm>,
    pub confirming: bool,
    pub images: HashMap<String, ImageState>,
    pub http: reqwest::Client,
    pub status: Option<StatusLine>,
    /// Present after the backend asked for a login
    pub login_url: Option<String>,
}

impl RadarState {
    pub fn new(config: Config, api: Arc<dyn BackendApi>) -> Self {
        let filters = Filters::from(&config.display);
        let poller_config = PollerConfig::from(&config.polling);
        let http = reqwest::Client::builder()
            .user_agent(concat!("anisong-radar/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            config,
            filters,
            api,
            poller_config,
            poller: None,
            polling_active: true,
            playback: PlaybackState::default(),
            report: None,
            confirming: false,
            images: HashMap::new(),
            http,
            status: None,
            login_url: None,
        }
    }

    /// Keep only the pictures the current state can show and return the
    /// URLs that still need fetching (marked as loading).
    pub fn sync_images(&mut self) -> Vec<String> {
        let wanted = image_urls(&self.playback);
        self.images.retain(|url, _| wanted.contains(url));

        let mut missing = Vec::new();
        for url in wanted {
            if !self.images.contains_key(&url) {
                self.images.insert(url.clone(), ImageState::Loading);
                missing.push(url);
            }
        }
        missing.sort();
        missing
    }

    pub fn image(&self, url: &str) -> Option<&ImageState> {
        self.images.get(url)
    }
}

/// Every picture URL referenced by a state: album art plus entry covers and banners.
pub fn image_urls(state: &PlaybackState) -> HashSet<String> {
    let album = state
        .song_info
        .as_ref()
        .and_then(|s| s.album_art_url.clone());

    album
        .into_iter()
        .chain(
            state
                .primary_matches
                .iter()
                .chain(state.secondary_matches.iter())
                .flat_map(|m| m.cover_url.iter().chain(m.banner_url.iter()).cloned()),
        )
        .filter(|url| !url.trim().is_empty())
        .collect()
}
