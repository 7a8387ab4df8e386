//! One-shot update request.

use tokio::runtime::Runtime;

use crate::api::{BackendClient, PollOutcome, classify};
use crate::config::Config;
use crate::model::PlaybackState;
use crate::presenter::{Filters, render_text};

/// Fetch `/api/update` once and print the result
pub fn cmd_poll(rt: &Runtime, config: &Config, refresh: bool, raw: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let client = BackendClient::from_config(&config.server)?;
        let body = client.fetch_update_raw(refresh).await?;

        if raw {
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        print_outcome(classify(&body), &client.login_url());
        Ok(())
    })
}

/// Print a classified update the way `poll` does
pub(super) fn print_outcome(outcome: PollOutcome, login_url: &str) {
    println!("Outcome: {}", outcome.kind());
    match outcome {
        PollOutcome::NoUpdate => {
            println!("Nothing new since the last poll. Try --refresh.");
        }
        PollOutcome::LoginRequired => {
            println!("Not logged in. Log in at {}", login_url);
        }
        PollOutcome::NotPlaying => {
            print!("{}", render_text(&PlaybackState::not_playing(), Filters::all()));
        }
        PollOutcome::UnapprovedUser => {
            print!("{}", render_text(&PlaybackState::unapproved(), Filters::all()));
        }
        PollOutcome::Miss {
            song,
            track_id,
            possible,
        } => {
            let state = PlaybackState::miss(song, track_id, possible);
            print_state(&state);
        }
        PollOutcome::Hit {
            song,
            track_id,
            certainty,
            matches,
            more_by_artist,
        } => {
            let state = PlaybackState::hit(song, track_id, certainty, matches, more_by_artist);
            print_state(&state);
        }
    }
}

fn print_state(state: &PlaybackState) {
    if let Some(id) = &state.current_track_id {
        println!("Track id: {}", id);
    }
    println!(
        "Confirm: {}",
        if state.confirm_enabled {
            "available"
        } else {
            "not needed"
        }
    );
    if state.song_info.is_some() {
        println!("Matches: {}", state.match_count());
    }
    print!("{}", render_text(state, Filters::all()));
}
