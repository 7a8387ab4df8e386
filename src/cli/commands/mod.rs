//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for anisong-radar.
//! Each subcommand is implemented in its own submodule:
//! - `watch`: Headless poller printing the now-playing panel
//! - `poll`: One-shot update request
//! - `actions`: Confirm and report submissions
//! - `settings`: Config file inspection

mod actions;
mod poll;
mod settings;
mod watch;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config;
use crate::presenter::Filters;

pub use actions::{cmd_confirm, cmd_report};
pub use poll::cmd_poll;
pub use settings::cmd_config;
pub use watch::cmd_watch;

/// anisong-radar CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = "ANISONG_RADAR_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Keep polling and print the playing song and its anime on every change
    Watch {
        /// Hide opening themes
        #[arg(long)]
        no_openings: bool,
        /// Hide insert songs
        #[arg(long)]
        no_inserts: bool,
        /// Hide ending themes
        #[arg(long)]
        no_endings: bool,
        /// Seconds between polls (default: from config)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Ask the backend once and print what it says
    Poll {
        /// Force the backend to re-resolve the track
        #[arg(long)]
        refresh: bool,
        /// Print the raw JSON instead of the classified outcome
        #[arg(long)]
        raw: bool,
    },
    /// Confirm which anime a track belongs to
    Confirm {
        /// Streaming-service track id
        #[arg(long)]
        track_id: String,
        /// Song name as listed on AnimeNewsNetwork
        #[arg(long)]
        song_name: String,
        /// AnimeNewsNetwork artist id (repeatable)
        #[arg(long = "artist-id", required = true)]
        artist_ids: Vec<i32>,
    },
    /// Report a wrong match
    Report {
        /// Streaming-service track id
        #[arg(long)]
        track_id: String,
        /// AnimeNewsNetwork song id of the wrong entry
        #[arg(long)]
        ann_song_id: i32,
        /// What is wrong with the match
        #[arg(long)]
        reason: String,
    },
    /// Show the config file, or write the defaults with --init
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the GUI should launch).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    let rt = Runtime::new()?;
    let config = config::load().with_server_override(cli.server.as_deref());

    match command {
        Commands::Watch {
            no_openings,
            no_inserts,
            no_endings,
            interval,
        } => {
            let mut filters = Filters::from(&config.display);
            for (hide, flag) in [
                (*no_openings, Filters::OPENING),
                (*no_inserts, Filters::INSERT),
                (*no_endings, Filters::ENDING),
            ] {
                if hide {
                    filters.remove(flag);
                }
            }
            cmd_watch(&rt, &config, filters, *interval)?;
        }
        Commands::Poll { refresh, raw } => {
            cmd_poll(&rt, &config, *refresh, *raw)?;
        }
        Commands::Confirm {
            track_id,
            song_name,
            artist_ids,
        } => {
            cmd_confirm(&rt, &config, track_id, song_name, artist_ids)?;
        }
        Commands::Report {
            track_id,
            ann_song_id,
            reason,
        } => {
            cmd_report(&rt, &config, track_id, *ann_song_id, reason)?;
        }
        Commands::Config { init } => {
            cmd_config(&config, *init)?;
        }
    }

    Ok(true)
}
