//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ApiError`], [`ConfigError`]), while CLI/main uses `anyhow` for
//! convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use anisong_radar::error::{Result, ResultExt};
//!
//! fn send(api: &BackendClient, request: &ReportRequest) -> Result<String> {
//!     let reply = block_on(api.report(request)).with_context("while reporting")?;
//!     Ok(reply)
//! }
//! ```

use crate::api::ApiError;
use crate::config::ConfigError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File or terminal I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend request error
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad user input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ApiError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Api(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ConfigError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Config(e).context(ctx))
    }
}
