//! Duration clamp policy.
//!
//! Every duration that enters the system -- timer configuration, manual
//! session logging, session edits -- passes through [`clamp_minutes`] first.
//! Out-of-range input is corrected locally, never rejected: below the range
//! it is silently raised to 1 minute, above the range it is cut to 240 and a
//! non-blocking [`Advisory`] is raised for the UI to show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest accepted session duration, in minutes.
pub const MIN_DURATION_MIN: u32 = 1;
/// Largest accepted session duration, in minutes (4 hours).
pub const MAX_DURATION_MIN: u32 = 240;
/// The one duration that classifies a session as a Pomodoro.
pub const POMODORO_MIN: u32 = 25;
/// How long the over-limit advisory stays up before auto-dismissing.
pub const ADVISORY_TTL_SECS: i64 = 10;

/// Coerce a requested duration into [1, 240].
///
/// Returns the clamped value and whether the upper bound was hit (the only
/// case that warrants an advisory).
pub fn clamp_minutes(requested: i64) -> (u32, bool) {
    if requested > MAX_DURATION_MIN as i64 {
        (MAX_DURATION_MIN, true)
    } else if requested < MIN_DURATION_MIN as i64 {
        (MIN_DURATION_MIN, false)
    } else {
        (requested as u32, false)
    }
}

/// Non-blocking notice raised when a duration above 240 minutes is clamped.
///
/// Sessions beyond 4 hours harm focus and learning quality; the UI shows the
/// notice without interrupting the user and drops it after 10 seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// The duration the user asked for.
    pub requested: i64,
    /// What it was clamped to (always 240).
    pub clamped: u32,
    pub raised_at: DateTime<Utc>,
}

impl Advisory {
    pub fn new(requested: i64, clamped: u32, raised_at: DateTime<Utc>) -> Self {
        Self {
            requested,
            clamped,
            raised_at,
        }
    }

    /// Whether the 10-second display window has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.raised_at).num_seconds() >= ADVISORY_TTL_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    #[test]
    fn clamps_above_upper_bound_with_advisory() {
        assert_eq!(clamp_minutes(300), (240, true));
        assert_eq!(clamp_minutes(241), (240, true));
    }

    #[test]
    fn clamps_below_lower_bound_silently() {
        assert_eq!(clamp_minutes(0), (1, false));
        assert_eq!(clamp_minutes(-10), (1, false));
    }

    #[test]
    fn passes_in_range_values_through() {
        assert_eq!(clamp_minutes(1), (1, false));
        assert_eq!(clamp_minutes(25), (25, false));
        assert_eq!(clamp_minutes(240), (240, false));
    }

    #[test]
    fn advisory_expires_after_ten_seconds() {
        let raised = Utc::now();
        let advisory = Advisory::new(300, 240, raised);
        assert!(!advisory.is_expired(raised + Duration::seconds(9)));
        assert!(advisory.is_expired(raised + Duration::seconds(10)));
    }

    proptest! {
        #[test]
        fn clamp_always_lands_in_range(requested in i64::MIN / 2..i64::MAX / 2) {
            let (clamped, _) = clamp_minutes(requested);
            prop_assert!((MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&clamped));
        }

        #[test]
        fn only_twenty_five_classifies_as_pomodoro(requested in -1000i64..1000) {
            let (clamped, _) = clamp_minutes(requested);
            let is_pomodoro =
                crate::session::SessionKind::classify(clamped) == crate::session::SessionKind::Pomodoro;
            prop_assert_eq!(is_pomodoro, clamped == POMODORO_MIN);
        }

        #[test]
        fn advisory_only_on_upper_bound(requested in -1000i64..1000) {
            let (_, advisory) = clamp_minutes(requested);
            prop_assert_eq!(advisory, requested > MAX_DURATION_MIN as i64);
        }
    }
}
