//! Confirm and report commands.

use std::sync::Arc;

use tokio::runtime::Runtime;

use super::poll::print_outcome;
use crate::actions::{self, ConfirmRequest, ReportRequest};
use crate::api::{BackendApi, BackendClient};
use crate::config::Config;
use crate::error::Error;

/// Bind a track to an anime song, then poll once with a forced refresh
pub fn cmd_confirm(
    rt: &Runtime,
    config: &Config,
    track_id: &str,
    song_name: &str,
    artist_ids: &[i32],
) -> anyhow::Result<()> {
    let request = confirm_request(track_id, song_name, artist_ids)?;

    rt.block_on(async {
        let api: Arc<dyn BackendApi> = Arc::new(BackendClient::from_config(&config.server)?);
        println!("Confirming '{}' for track {}", request.song_name, track_id);

        let repoll = Arc::clone(&api);
        let refreshed =
            actions::submit_confirm(Arc::clone(&api), request, move || async move {
                repoll.fetch_update(true).await
            })
            .await
            .await;

        match refreshed {
            Ok(outcome) => {
                println!();
                print_outcome(outcome, &api.login_url());
            }
            Err(e) => eprintln!("! Re-poll failed: {}", e),
        }
        Ok(())
    })
}

/// Report a wrong match
pub fn cmd_report(
    rt: &Runtime,
    config: &Config,
    track_id: &str,
    ann_song_id: i32,
    reason: &str,
) -> anyhow::Result<()> {
    let request = report_request(track_id, ann_song_id, reason)?;

    rt.block_on(async {
        let api: Arc<dyn BackendApi> = Arc::new(BackendClient::from_config(&config.server)?);
        println!("Reporting song {} on track {}", ann_song_id, track_id);

        actions::submit_report(api, request, || println!("Report sent.")).await;
        Ok(())
    })
}

fn confirm_request(
    track_id: &str,
    song_name: &str,
    artist_ids: &[i32],
) -> Result<ConfirmRequest, Error> {
    if track_id.trim().is_empty() {
        return Err(Error::invalid_argument("--track-id must not be empty"));
    }
    if song_name.trim().is_empty() {
        return Err(Error::invalid_argument("--song-name must not be empty"));
    }
    Ok(ConfirmRequest {
        song_name: song_name.to_string(),
        artist_ids: artist_ids.to_vec(),
        spotify_id: track_id.to_string(),
    })
}

fn report_request(track_id: &str, ann_song_id: i32, reason: &str) -> Result<ReportRequest, Error> {
    if track_id.trim().is_empty() {
        return Err(Error::invalid_argument("--track-id must not be empty"));
    }
    if reason.trim().is_empty() {
        return Err(Error::invalid_argument("--reason must not be empty"));
    }
    Ok(ReportRequest {
        spotify_id: track_id.to_string(),
        ann_song_id,
        reason: reason.trim().to_string(),
    })
}
