//! In-memory collection of focus session records.
//!
//! The store is a plain newest-first vec: record counts per user stay small,
//! so every read is a full scan with a predicate and no indexing is kept.
//! Mutations addressed at an id that is not present are silent no-ops --
//! the user is the sole actor, so a missing id is stale UI, not a fault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::{FocusSession, SessionKind, SessionPatch};
use crate::timer::duration::clamp_minutes;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStore {
    sessions: Vec<FocusSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }

    pub fn get(&self, id: Uuid) -> Option<&FocusSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Add a record at the front of the collection.
    pub fn append(&mut self, session: FocusSession) {
        self.sessions.insert(0, session);
    }

    /// Log a finished session directly, bypassing the timer. The duration
    /// passes through the same clamp as timer configuration.
    pub fn log(
        &mut self,
        subject: impl Into<String>,
        minutes: i64,
        started_at: DateTime<Utc>,
    ) -> &FocusSession {
        let (duration_min, _) = clamp_minutes(minutes);
        self.append(FocusSession::new(subject, duration_min, started_at, true));
        &self.sessions[0]
    }

    /// Replace subject, timestamp, duration, and kind of an existing record.
    /// Completion status is never touched. Returns false (and changes
    /// nothing) if the id is absent.
    pub fn update(&mut self, id: Uuid, patch: SessionPatch) -> bool {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let (duration_min, _) = clamp_minutes(patch.duration_min);
        session.subject = patch.subject;
        session.started_at = patch.started_at;
        session.duration_min = duration_min;
        session.kind = SessionKind::classify(duration_min);
        true
    }

    /// Delete the record matching id. Destructive, no undo. Returns false
    /// if the id is absent.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        self.sessions.len() != before
    }

    /// The `count` most recent sessions by start timestamp, newest first.
    ///
    /// Manual logging and edits can put timestamps out of storage order, so
    /// this sorts rather than trusting insertion order.
    pub fn recent(&self, count: usize) -> Vec<&FocusSession> {
        let mut sorted: Vec<&FocusSession> = self.sessions.iter().collect();
        sorted.sort_by_key(|s| std::cmp::Reverse(s.started_at));
        sorted.truncate(count);
        sorted
    }
}
