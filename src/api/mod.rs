//! Backend HTTP API
//!
//! The backend exposes four endpoints under the configured base URL:
//! - `GET /api/update[?refresh=true]` - what is playing and which anime it is from
//! - `POST /api/confirm_anime` - bind the playing track to an anime
//! - `POST /api/report` - flag a wrong match
//! - `GET /api/login` - browser login flow (never fetched by us, only opened)

mod classify;
mod client;
pub mod dto;
pub mod traits;

pub use classify::{PollOutcome, classify};
pub use client::BackendClient;
pub use traits::BackendApi;

use thiserror::Error;

/// Errors talking to the backend
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}
