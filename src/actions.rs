//! Confirm and report actions.
//!
//! Both are fire-and-forget: the request is sent once, its reply or error is
//! logged, and the caller's continuation runs exactly once afterwards. There
//! is no retry and nothing to roll back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::BackendApi;
use crate::model::{AnimeMatch, PlaybackState};

/// Body of `POST /api/confirm_anime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub song_name: String,
    pub artist_ids: Vec<i32>,
    /// Track the anime is being bound to
    pub spotify_id: String,
}

impl ConfirmRequest {
    /// Build a confirmation of `anime` for the state's current track.
    ///
    /// Returns None when nothing is playing.
    pub fn for_match(state: &PlaybackState, anime: &AnimeMatch) -> Option<Self> {
        let spotify_id = state.current_track_id.clone()?;
        Some(Self {
            song_name: anime.song_name.clone(),
            artist_ids: anime.artist_ids.to_vec(),
            spotify_id,
        })
    }
}

/// Body of `POST /api/report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub spotify_id: String,
    pub ann_song_id: i32,
    pub reason: String,
}

impl ReportRequest {
    /// Build a report against `anime`. Returns None when the entry carries no
    /// song id to report.
    pub fn new(
        track_id: impl Into<String>,
        anime: &AnimeMatch,
        reason: impl Into<String>,
    ) -> Option<Self> {
        Some(Self {
            spotify_id: track_id.into(),
            ann_song_id: anime.ann_song_id?,
            reason: reason.into(),
        })
    }
}

/// Send a confirmation, then run `then`.
pub async fn submit_confirm<T>(
    api: Arc<dyn BackendApi>,
    request: ConfirmRequest,
    then: impl FnOnce() -> T + Send,
) -> T {
    match api.confirm_anime(&request).await {
        Ok(reply) => tracing::info!(
            target: "actions",
            "Confirmed '{}' for track {}: {}",
            request.song_name,
            request.spotify_id,
            reply
        ),
        Err(e) => tracing::warn!(target: "actions", "Confirm failed: {}", e),
    }
    then()
}

/// Send a report, then run `then`.
pub async fn submit_report<T>(
    api: Arc<dyn BackendApi>,
    request: ReportRequest,
    then: impl FnOnce() -> T + Send,
) -> T {
    match api.report(&request).await {
        Ok(reply) => tracing::info!(
            target: "actions",
            "Reported song {} on track {}: {}",
            request.ann_song_id,
            request.spotify_id,
            reply
        ),
        Err(e) => tracing::warn!(target: "actions", "Report failed: {}", e),
    }
    then()
}
