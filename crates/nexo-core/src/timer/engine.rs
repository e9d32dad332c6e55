//! Countdown timer engine.
//!
//! The engine is a two-state machine (`Idle` / `Running`) that counts a
//! configured duration down to zero one second at a time. It owns no thread:
//! the caller drives it, either at 1 Hz through [`tick`](TimerEngine::tick)
//! (what [`Ticker`](super::Ticker) does) or in bulk through
//! [`catch_up`](TimerEngine::catch_up) when a process wakes up after being
//! away.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running        start
//! Running -> Idle        pause (remaining preserved)
//! Running -> Idle        completion (remaining reset, exactly one completion
//!                        per arm-to-zero cycle)
//! any -> Idle            reset (remaining reset, no session created)
//! ```
//!
//! Configuration changes (duration, subject) are only accepted while idle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::{clamp_minutes, Advisory};
use crate::events::Event;
use crate::session::SessionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Snapshot taken at the instant the countdown reaches zero.
///
/// Carries the configuration the countdown was armed with (not the
/// post-reset values) so the session factory can build the record from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerCompletion {
    pub subject: String,
    pub duration_min: u32,
    pub kind: SessionKind,
    pub at: DateTime<Utc>,
}

/// Core countdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    subject: String,
    /// Duration the countdown was (re)armed with, in minutes. Always clamped.
    configured_min: u32,
    /// Seconds left in the current countdown.
    remaining_secs: u32,
    /// Epoch ms of the last observed tick; used by `catch_up` to replay the
    /// seconds a sporadic caller missed.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
    /// Pending over-limit advisory, if any. Expires 10 s after being raised.
    #[serde(default)]
    advisory: Option<Advisory>,
}

impl TimerEngine {
    /// Create an idle engine with the default configuration
    /// (25 minutes, subject "Geral").
    pub fn new() -> Self {
        Self::with_config(25, "Geral")
    }

    /// Create an idle engine with the given configuration. The duration is
    /// clamped; an out-of-range request here raises no advisory.
    pub fn with_config(minutes: i64, subject: impl Into<String>) -> Self {
        let (configured_min, _) = clamp_minutes(minutes);
        Self {
            state: TimerState::Idle,
            subject: subject.into(),
            configured_min,
            remaining_secs: configured_min * 60,
            last_tick_epoch_ms: None,
            advisory: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn configured_min(&self) -> u32 {
        self.configured_min
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Classification the next completed session will carry.
    pub fn kind(&self) -> SessionKind {
        SessionKind::classify(self.configured_min)
    }

    /// 0.0 .. 1.0 progress within the current countdown.
    pub fn progress(&self) -> f64 {
        let total = self.configured_min as f64 * 60.0;
        if total == 0.0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total)
    }

    /// The pending advisory, if it has not auto-dismissed yet.
    pub fn advisory(&self) -> Option<&Advisory> {
        let now = Utc::now();
        self.advisory.as_ref().filter(|a| !a.is_expired(now))
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            subject: self.subject.clone(),
            kind: self.kind(),
            configured_min: self.configured_min,
            remaining_secs: self.remaining_secs,
            progress: self.progress(),
            advisory: self.advisory().cloned(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the countdown. Starting from a paused countdown resumes it with
    /// the preserved remaining time. Returns `None` if already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::TimerStarted {
                    subject: self.subject.clone(),
                    kind: self.kind(),
                    duration_secs: self.configured_min * 60,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Disarm without resetting: the remaining time is preserved for resume.
    /// Returns `None` if not running.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Idle;
                self.last_tick_epoch_ms = None;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Idle => None,
        }
    }

    /// Force the countdown back to the configured duration, disarmed.
    /// Discards any in-progress countdown without creating a session.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.configured_min * 60;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by exactly one second.
    ///
    /// Call at 1 Hz while armed. When the countdown reaches zero the engine
    /// disarms itself, resets `remaining_secs` to the configured duration,
    /// and returns the completion snapshot -- exactly once per armed period.
    pub fn tick(&mut self) -> Option<TimerCompletion> {
        self.tick_at(now_ms())
    }

    /// Replay the ticks a sporadic caller missed since the last observed
    /// tick, stopping at completion. A gap longer than the remaining time
    /// still yields exactly one completion.
    pub fn catch_up(&mut self) -> Option<TimerCompletion> {
        self.catch_up_at(Utc::now())
    }

    /// [`catch_up`](Self::catch_up) against an explicit clock.
    ///
    /// Each replayed tick is attributed to the second it actually elapsed,
    /// so a countdown that finished while no process was alive gets a
    /// completion stamped with its historical instant, not the replay time.
    pub fn catch_up_at(&mut self, now: DateTime<Utc>) -> Option<TimerCompletion> {
        if self.state != TimerState::Running {
            return None;
        }
        let now_epoch_ms = now.timestamp_millis().max(0) as u64;
        let last = self.last_tick_epoch_ms.unwrap_or(now_epoch_ms);
        let elapsed_secs = now_epoch_ms.saturating_sub(last) / 1000;
        for i in 1..=elapsed_secs {
            if let Some(completion) = self.tick_at(last + i * 1000) {
                return Some(completion);
            }
        }
        None
    }

    /// Change the configured duration. Only accepted while idle; the request
    /// is clamped to [1, 240] and the countdown is reset to the new value.
    /// Returns `None` while armed.
    pub fn set_duration(&mut self, requested: i64) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        let (minutes, hit_upper) = clamp_minutes(requested);
        self.configured_min = minutes;
        self.remaining_secs = minutes * 60;
        let at = Utc::now();
        if hit_upper {
            let advisory = Advisory::new(requested, minutes, at);
            self.advisory = Some(advisory.clone());
            Some(Event::DurationClamped {
                requested,
                clamped: minutes,
                advisory,
                at,
            })
        } else {
            // An in-range change also dismisses any pending advisory.
            self.advisory = None;
            Some(Event::DurationSet {
                minutes,
                kind: self.kind(),
                at,
            })
        }
    }

    /// Change the subject future sessions will be attributed to.
    /// Only accepted while idle.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.subject = subject.into();
        Some(Event::SubjectChanged {
            subject: self.subject.clone(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// One-second decrement attributed to `epoch_ms`.
    fn tick_at(&mut self, epoch_ms: u64) -> Option<TimerCompletion> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.last_tick_epoch_ms = Some(epoch_ms);
        if self.remaining_secs == 0 {
            return Some(self.complete_cycle(epoch_ms));
        }
        None
    }

    fn complete_cycle(&mut self, epoch_ms: u64) -> TimerCompletion {
        let completion = TimerCompletion {
            subject: self.subject.clone(),
            duration_min: self.configured_min,
            kind: self.kind(),
            at: DateTime::from_timestamp_millis(epoch_ms as i64).unwrap_or_else(Utc::now),
        };
        self.state = TimerState::Idle;
        self.remaining_secs = self.configured_min * 60;
        self.last_tick_epoch_ms = None;
        completion
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_defaults() {
        let engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.configured_min(), 25);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert_eq!(engine.subject(), "Geral");
        assert_eq!(engine.kind(), SessionKind::Pomodoro);
    }

    #[test]
    fn start_pause_preserves_remaining() {
        let mut engine = TimerEngine::with_config(2, "Matemática");
        assert!(engine.start().is_some());
        for _ in 0..30 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.remaining_secs(), 90);

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 90);

        // Resume keeps counting from where it left off.
        assert!(engine.start().is_some());
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 89);
    }

    #[test]
    fn double_start_is_rejected() {
        let mut engine = TimerEngine::new();
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
    }

    #[test]
    fn pause_while_idle_is_rejected() {
        let mut engine = TimerEngine::new();
        assert!(engine.pause().is_none());
    }

    #[test]
    fn full_countdown_yields_exactly_one_completion() {
        let mut engine = TimerEngine::with_config(1, "Física");
        engine.start();

        let mut completions = Vec::new();
        for _ in 0..60 {
            if let Some(c) = engine.tick() {
                completions.push(c);
            }
        }
        assert_eq!(completions.len(), 1);
        let completion = &completions[0];
        assert_eq!(completion.duration_min, 1);
        assert_eq!(completion.subject, "Física");
        assert_eq!(completion.kind, SessionKind::Free);

        // Post-completion: idle, countdown reset, further ticks are inert.
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 60);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn reset_discards_progress_without_a_session() {
        let mut engine = TimerEngine::with_config(5, "Geral");
        engine.start();
        engine.tick();
        engine.tick();
        assert!(engine.reset().is_some());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 5 * 60);
    }

    #[test]
    fn configuration_rejected_while_armed() {
        let mut engine = TimerEngine::new();
        engine.start();
        assert!(engine.set_duration(50).is_none());
        assert!(engine.set_subject("História").is_none());
        assert_eq!(engine.configured_min(), 25);
        assert_eq!(engine.subject(), "Geral");
    }

    #[test]
    fn duration_change_resets_countdown_and_kind() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        engine.pause();

        match engine.set_duration(45) {
            Some(Event::DurationSet { minutes, kind, .. }) => {
                assert_eq!(minutes, 45);
                assert_eq!(kind, SessionKind::Free);
            }
            other => panic!("expected DurationSet, got {other:?}"),
        }
        assert_eq!(engine.remaining_secs(), 45 * 60);
    }

    #[test]
    fn over_limit_duration_clamps_and_raises_advisory() {
        let mut engine = TimerEngine::new();
        match engine.set_duration(300) {
            Some(Event::DurationClamped {
                requested, clamped, ..
            }) => {
                assert_eq!(requested, 300);
                assert_eq!(clamped, 240);
            }
            other => panic!("expected DurationClamped, got {other:?}"),
        }
        assert_eq!(engine.configured_min(), 240);
        assert_eq!(engine.remaining_secs(), 240 * 60);
        assert_eq!(engine.kind(), SessionKind::Free);
        assert!(engine.advisory().is_some());

        // A later in-range change dismisses the advisory.
        engine.set_duration(25);
        assert!(engine.advisory().is_none());
    }

    #[test]
    fn under_limit_duration_clamps_silently() {
        let mut engine = TimerEngine::new();
        match engine.set_duration(0) {
            Some(Event::DurationSet { minutes, .. }) => assert_eq!(minutes, 1),
            other => panic!("expected DurationSet, got {other:?}"),
        }
        assert!(engine.advisory().is_none());
    }

    #[test]
    fn completion_snapshot_uses_armed_duration_not_post_reset() {
        let mut engine = TimerEngine::with_config(1, "Química");
        engine.start();
        let mut completion = None;
        for _ in 0..60 {
            if let Some(c) = engine.tick() {
                completion = Some(c);
            }
        }
        let completion = completion.expect("countdown should have completed");
        assert_eq!(completion.duration_min, 1);
        // The engine itself has already been reset for the next cycle.
        assert_eq!(engine.remaining_secs(), 60);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut engine = TimerEngine::with_config(1, "Geral");
        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        match engine.snapshot() {
            Event::StateSnapshot {
                remaining_secs,
                progress,
                ..
            } => {
                assert_eq!(remaining_secs, 30);
                assert!((progress - 0.5).abs() < 1e-9);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn replayed_completion_keeps_its_historical_instant() {
        let mut engine = TimerEngine::with_config(1, "Física");
        engine.start();
        let armed_at = Utc::now();

        // The process comes back two days later; the countdown actually hit
        // zero sixty seconds after arming, and the record must say so.
        let two_days_later = armed_at + chrono::Duration::days(2);
        let completion = engine
            .catch_up_at(two_days_later)
            .expect("gap past zero must replay the completion");

        let finished_at = armed_at + chrono::Duration::seconds(60);
        assert!((completion.at - finished_at).num_seconds().abs() <= 1);
        assert!((two_days_later - completion.at).num_hours() >= 47);
        assert_eq!(engine.state(), TimerState::Idle);

        // Nothing further to replay for the same gap.
        assert!(engine.catch_up_at(two_days_later).is_none());
    }

    #[test]
    fn catch_up_replays_only_the_elapsed_seconds() {
        let mut engine = TimerEngine::with_config(25, "Geral");
        engine.start();
        let armed_at = Utc::now();

        assert!(engine
            .catch_up_at(armed_at + chrono::Duration::seconds(90))
            .is_none());
        assert_eq!(engine.state(), TimerState::Running);
        // 90 seconds replayed, give or take the instant between arm and now.
        assert!(engine.remaining_secs() <= 25 * 60 - 90);
        assert!(engine.remaining_secs() >= 25 * 60 - 91);
    }

    #[test]
    fn engine_round_trips_through_json() {
        let mut engine = TimerEngine::with_config(50, "História");
        engine.start();
        engine.tick();
        engine.pause();
        let json = serde_json::to_string(&engine).unwrap();
        let restored: TimerEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Idle);
        assert_eq!(restored.remaining_secs(), 50 * 60 - 1);
        assert_eq!(restored.subject(), "História");
    }
}
