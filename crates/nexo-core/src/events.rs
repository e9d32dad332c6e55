use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{FocusSession, SessionKind};
use crate::timer::{Advisory, TimerState};

/// Every state change in the timer subsystem produces an Event.
/// The UI layer polls for these; they are also what the CLI prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        subject: String,
        kind: SessionKind,
        duration_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero and a session record was created.
    TimerCompleted {
        session: FocusSession,
        /// Whether the completion sound should play (user preference).
        play_sound: bool,
        at: DateTime<Utc>,
    },
    /// The configured duration changed while idle.
    DurationSet {
        minutes: u32,
        kind: SessionKind,
        at: DateTime<Utc>,
    },
    /// A duration above 240 minutes was cut to 240; carries the advisory
    /// the UI should display for 10 seconds.
    DurationClamped {
        requested: i64,
        clamped: u32,
        advisory: Advisory,
        at: DateTime<Utc>,
    },
    SubjectChanged {
        subject: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        subject: String,
        kind: SessionKind,
        configured_min: u32,
        remaining_secs: u32,
        progress: f64,
        advisory: Option<Advisory>,
        at: DateTime<Utc>,
    },
}
