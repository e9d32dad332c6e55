use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::duration::POMODORO_MIN;

/// Session classification, derived from the configured duration.
///
/// A session is a Pomodoro only when its duration was exactly 25 minutes at
/// the moment it was created or edited. Every other duration is Free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Pomodoro,
    Free,
}

impl SessionKind {
    /// Classify a (already clamped) duration in minutes.
    pub fn classify(duration_min: u32) -> Self {
        if duration_min == POMODORO_MIN {
            SessionKind::Pomodoro
        } else {
            SessionKind::Free
        }
    }
}

/// A recorded interval of study time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Uuid,
    /// Free-text subject label. Not validated against any enum; exact string
    /// identity is what the aggregators group by.
    pub subject: String,
    /// Instant the session is attributed to.
    pub started_at: DateTime<Utc>,
    /// Duration in minutes, always within [1, 240].
    pub duration_min: u32,
    pub kind: SessionKind,
    /// True once the countdown reached zero or the session was logged as
    /// finished manually.
    pub completed: bool,
}

impl FocusSession {
    /// Build a session record. `duration_min` must already be clamped; the
    /// kind is derived from it, never passed in.
    pub fn new(
        subject: impl Into<String>,
        duration_min: u32,
        started_at: DateTime<Utc>,
        completed: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            started_at,
            duration_min,
            kind: SessionKind::classify(duration_min),
            completed,
        }
    }
}

/// Full replacement payload for editing an existing session.
///
/// `completed` is deliberately absent: edits never change completion status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPatch {
    pub subject: String,
    pub started_at: DateTime<Utc>,
    /// Requested duration in minutes; clamped to [1, 240] on apply.
    pub duration_min: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_minutes_is_a_pomodoro() {
        assert_eq!(SessionKind::classify(25), SessionKind::Pomodoro);
    }

    #[test]
    fn any_other_duration_is_free() {
        assert_eq!(SessionKind::classify(24), SessionKind::Free);
        assert_eq!(SessionKind::classify(26), SessionKind::Free);
        assert_eq!(SessionKind::classify(1), SessionKind::Free);
        assert_eq!(SessionKind::classify(240), SessionKind::Free);
    }

    #[test]
    fn new_session_derives_kind() {
        let s = FocusSession::new("Matemática", 25, Utc::now(), true);
        assert_eq!(s.kind, SessionKind::Pomodoro);
        let s = FocusSession::new("Física", 45, Utc::now(), true);
        assert_eq!(s.kind, SessionKind::Free);
    }
}
