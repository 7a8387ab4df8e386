//! The poll cycle state machine.
//!
//! Pure bookkeeping, no I/O: the driver task asks it for requests, feeds the
//! responses back in, and carries out the returned [`PollEffect`]s.
//!
//! ```text
//! Idle --start--> Polling --cycle response--> Scheduled --timer--> Polling ...
//!   any --stop / login required--> Stopped
//! ```
//!
//! Manual refreshes run alongside the cycle. They never arm the timer, so at
//! most one timer is ever pending.

use crate::api::{ApiError, PollOutcome};
use crate::model::PlaybackState;

/// Where the cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// The cycle request is in flight
    Polling,
    /// Waiting on the timer
    Scheduled,
    Stopped,
}

/// Who asked for a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// The initial poll or a timer tick
    Cycle,
    /// A user action (refresh button, post-confirm re-poll)
    Manual,
}

/// One poll to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollRequest {
    /// Monotonic, issued in request order
    pub seq: u64,
    /// Ask the backend to re-resolve the track
    pub refresh: bool,
    pub origin: RequestOrigin,
}

/// What the driver should do after a response.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEffect {
    /// Schedule the next cycle poll one interval from now
    ArmTimer,
    StateChanged(PlaybackState),
    /// Send the user to the login page; the cycle is over
    LoginRequired,
    Failed(String),
}

/// Owns the poll schedule and the current [`PlaybackState`].
#[derive(Debug)]
pub struct PollCycle {
    phase: Phase,
    next_seq: u64,
    /// Sequence number of the newest response applied so far (0 = none)
    last_applied: u64,
    state: PlaybackState,
}

impl Default for PollCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PollCycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            next_seq: 1,
            last_applied: 0,
            state: PlaybackState::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    fn issue(&mut self, refresh: bool, origin: RequestOrigin) -> PollRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        PollRequest {
            seq,
            refresh,
            origin,
        }
    }

    /// Begin the cycle with a forced poll.
    pub fn start(&mut self) -> Option<PollRequest> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.phase = Phase::Polling;
        Some(self.issue(true, RequestOrigin::Cycle))
    }

    /// The timer fired.
    pub fn on_timer(&mut self) -> Option<PollRequest> {
        if self.phase != Phase::Scheduled {
            return None;
        }
        self.phase = Phase::Polling;
        Some(self.issue(false, RequestOrigin::Cycle))
    }

    /// A forced poll outside the schedule. Leaves the phase and timer alone.
    pub fn manual_refresh(&mut self) -> Option<PollRequest> {
        if self.phase == Phase::Stopped {
            return None;
        }
        Some(self.issue(true, RequestOrigin::Manual))
    }

    /// Apply a finished request.
    pub fn on_response(
        &mut self,
        request: PollRequest,
        result: Result<PollOutcome, ApiError>,
    ) -> Vec<PollEffect> {
        if self.phase == Phase::Stopped {
            return Vec::new();
        }

        let mut effects = Vec::new();

        match result {
            Ok(outcome) if request.seq <= self.last_applied => {
                tracing::debug!(
                    target: "poller",
                    "Discarding stale {} from request {} (newest applied {})",
                    outcome.kind(),
                    request.seq,
                    self.last_applied
                );
            }
            Ok(PollOutcome::LoginRequired) => {
                tracing::info!(target: "poller", "Login required, stopping poll cycle");
                self.phase = Phase::Stopped;
                effects.push(PollEffect::LoginRequired);
                return effects;
            }
            Ok(outcome) => {
                self.last_applied = request.seq;
                tracing::debug!(
                    target: "poller",
                    "Applying {} from request {}",
                    outcome.kind(),
                    request.seq
                );
                if let Some(next) = next_state(outcome) {
                    self.state = next.clone();
                    effects.push(PollEffect::StateChanged(next));
                }
            }
            Err(e) => {
                tracing::warn!(target: "poller", "Poll {} failed: {}", request.seq, e);
                effects.push(PollEffect::Failed(e.to_string()));
            }
        }

        if request.origin == RequestOrigin::Cycle && self.phase == Phase::Polling {
            self.phase = Phase::Scheduled;
            effects.push(PollEffect::ArmTimer);
        }

        effects
    }

    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }
}

/// The state an outcome leads to, or None when nothing changes.
fn next_state(outcome: PollOutcome) -> Option<PlaybackState> {
    match outcome {
        PollOutcome::NoUpdate | PollOutcome::LoginRequired => None,
        PollOutcome::NotPlaying => Some(PlaybackState::not_playing()),
        PollOutcome::UnapprovedUser => Some(PlaybackState::unapproved()),
        PollOutcome::Miss {
            song,
            track_id,
            possible,
        } => Some(PlaybackState::miss(song, track_id, possible)),
        PollOutcome::Hit {
            song,
            track_id,
            certainty,
            matches,
            more_by_artist,
        } => Some(PlaybackState::hit(
            song,
            track_id,
            certainty,
            matches,
            more_by_artist,
        )),
    }
}
