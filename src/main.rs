//! Anisong Radar - find out which anime the song you are playing is from.
//!
//! The application polls an anime-song backend for the account's currently
//! playing track and shows the matching anime entries. It can be run as a GUI
//! application or used via CLI commands.

// Hide console window on Windows when running as GUI
// CLI commands will attach to the parent console or allocate one
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod actions;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod presenter;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use iced::application;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::AnisongRadar;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // If running CLI commands on Windows, attach to console for output
    #[cfg(target_os = "windows")]
    if args.command.is_some() {
        attach_console();
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("anisong_radar=info".parse()?))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        return Ok(());
    }

    // No command specified, launch the GUI
    let server_override = args.server.clone();
    application("Anisong Radar", AnisongRadar::update, AnisongRadar::view)
        .subscription(AnisongRadar::subscription)
        .theme(AnisongRadar::theme)
        .run_with(move || AnisongRadar::new(server_override))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// Attach to parent console on Windows for CLI output.
/// This is needed because windows_subsystem = "windows" detaches from console.
#[cfg(target_os = "windows")]
fn attach_console() {
    use windows_sys::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
    unsafe {
        // If that fails, we just won't have console output (acceptable for GUI launch)
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
