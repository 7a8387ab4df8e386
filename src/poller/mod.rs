//! Playback polling.
//!
//! [`cycle`] decides when to poll and what each response means;
//! [`task`] runs it on tokio with a real timer and HTTP requests.

pub mod cycle;
mod task;

pub use cycle::{Phase, PollCycle, PollEffect, PollRequest, RequestOrigin};
pub use task::{PollerConfig, PollerEvent, PollerHandle, spawn_poller};
