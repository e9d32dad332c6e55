//! Study metrics.
//!
//! Pure functions over a slice of session records (and tasks) plus an
//! explicit reference date, so every metric is reproducible in tests.
//! The `*_today` convenience wrappers bind the reference to the current
//! local date. All date comparisons use calendar-day boundaries in the
//! user's local timezone.
//!
//! Every function returns a well-defined zero/empty result for an empty
//! collection; none panics.

mod daily;
mod subjects;
mod weekly;

pub use daily::{
    daily_breakdown, daily_breakdown_today, pomodoros_on, pomodoros_today, sessions_on,
    sessions_today, study_hours_on, study_hours_today, tasks_done_on, tasks_done_today,
};
pub use subjects::{subject_distribution, SubjectShare};
pub use weekly::{
    daily_average, daily_average_today, monday_week_range, sunday_week_range,
    week_over_week_change, weekly_completion_rate, weekly_hours, weekly_hours_now,
    DAILY_GOAL_HOURS,
};

use chrono::{Local, NaiveDate};

use crate::session::FocusSession;

/// Sum of all recorded minutes across all time, as hours to 1 decimal.
pub fn total_study_hours(sessions: &[FocusSession]) -> f64 {
    let minutes: u64 = sessions.iter().map(|s| s.duration_min as u64).sum();
    round1(minutes as f64 / 60.0)
}

/// Calendar date a session falls on, in the user's local timezone.
pub(crate) fn local_date(session: &FocusSession) -> NaiveDate {
    session.started_at.with_timezone(&Local).date_naive()
}

pub(crate) fn round1(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn total_hours_is_zero_for_empty_store() {
        assert_eq!(total_study_hours(&[]), 0.0);
    }

    #[test]
    fn total_hours_rounds_to_one_decimal() {
        let sessions = vec![
            FocusSession::new("Matemática", 25, Utc::now(), true),
            FocusSession::new("Física", 45, Utc::now(), true),
        ];
        // 70 minutes -> 1.1666.. -> 1.2
        assert_eq!(total_study_hours(&sessions), 1.2);
    }
}
