//! Turns timer completions into session records.

use crate::prefs::Preferences;
use crate::timer::TimerCompletion;

use super::record::FocusSession;

/// A session record built from a completion, plus the side-effect decision.
#[derive(Debug, Clone)]
pub struct CompletedSession {
    pub session: FocusSession,
    /// Whether the completion sound should play. Gated by the user's
    /// `timer_sound` preference; the record is created either way.
    pub play_sound: bool,
}

/// Build the session record for a countdown that reached zero.
///
/// The completion snapshot carries the configuration the countdown was armed
/// with, taken at the instant of completion, so the record reflects what
/// actually ran -- not the engine's post-reset state.
pub fn from_completion(completion: TimerCompletion, prefs: &Preferences) -> CompletedSession {
    let session = FocusSession::new(
        completion.subject,
        completion.duration_min,
        completion.at,
        true,
    );
    CompletedSession {
        session,
        play_sound: prefs.timer_sound,
    }
}
