//! Config file inspection.

use crate::config::{self, Config};
use crate::error::ResultExt;

/// Print where the config lives and what is in effect
pub fn cmd_config(effective: &Config, init: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    match &path {
        Some(p) => println!("Config file: {}", p.display()),
        None => println!("Config file: (no config directory on this system)"),
    }

    if init {
        match &path {
            Some(p) if p.exists() => {
                println!("Already exists, leaving it alone.");
            }
            _ => {
                let written =
                    config::save(&Config::default()).with_context("writing default config")?;
                println!("✓ Wrote defaults to {}", written.display());
            }
        }
    }

    // Never echo the session cookie itself
    let mut shown = effective.clone();
    if shown.server.session_cookie.is_some() {
        shown.server.session_cookie = Some("<set>".to_string());
    }

    println!();
    println!("Effective settings:");
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}
