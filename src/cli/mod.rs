//! Command-line interface for anisong-radar.
//!
//! This module provides CLI commands for watching, polling, confirming and
//! reporting without launching the GUI.

mod commands;

pub use commands::{Cli, Commands, run_command};
