//! Headless watch mode.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Runtime;

use crate::api::{BackendApi, BackendClient};
use crate::config::Config;
use crate::poller::{PollerConfig, PollerEvent, spawn_poller};
use crate::presenter::{Filters, render_text};

/// Poll until Ctrl+C, printing every state change
pub fn cmd_watch(
    rt: &Runtime,
    config: &Config,
    filters: Filters,
    interval: Option<u64>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let client = BackendClient::from_config(&config.server)?;
        println!("Watching {}", client.base_url());
        println!("Press Ctrl+C to stop.\n");

        let mut poller_config = PollerConfig::from(&config.polling);
        if let Some(secs) = interval {
            poller_config.interval = Duration::from_secs(secs.max(1));
        }

        let api: Arc<dyn BackendApi> = Arc::new(client);
        let (handle, mut events) = spawn_poller(api, poller_config);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(PollerEvent::StateChanged(state)) => {
                        println!("[{}]", Utc::now().to_rfc3339());
                        println!("{}", render_text(&state, filters));
                    }
                    Some(PollerEvent::PollFailed(message)) => {
                        eprintln!("! Poll failed: {}", message);
                    }
                    Some(PollerEvent::LoginRequired { login_url }) => {
                        eprintln!("Login required. Opening {}", login_url);
                        eprintln!(
                            "After logging in, copy the session cookie into the config file \
                             (see `anisong-radar config`)."
                        );
                        if let Err(e) = open::that(&login_url) {
                            eprintln!("Could not open browser: {}", e);
                        }
                        break;
                    }
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    handle.shutdown();
                    println!("\nStopped.");
                    break;
                }
            }
        }

        Ok(())
    })
}
