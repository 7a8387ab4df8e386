//! Message types for the Anisong Radar UI.

use std::path::PathBuf;

use iced::widget::image;

use crate::config::Config;
use crate::model::AnimeMatch;
use crate::poller::{PollerEvent, PollerHandle};
use crate::presenter::Filters;

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Startup / reconnect
    ConfigLoaded(Config),
    Reconnect,

    // Poller subscription
    PollerReady(PollerHandle),
    Poller(PollerEvent),
    PollerStopped,
    RefreshPressed,

    // Filters
    FilterToggled(Filters, bool),
    ConfigSaved(Result<PathBuf, String>),

    // Confirm
    ConfirmPressed(AnimeMatch),
    ConfirmFinished,

    // Report form
    ReportOpened(AnimeMatch),
    ReportReasonChanged(String),
    ReportSubmitted,
    ReportCancelled,
    /// Carries the reported song id so a late finish only closes its own form
    ReportFinished(i32),

    // Pictures (background, non-blocking)
    ImageLoaded(String, Result<image::Handle, String>),

    // Browser
    LinkPressed(String),
    OpenLogin,
}
