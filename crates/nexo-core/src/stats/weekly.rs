//! Week-scoped metrics.
//!
//! Two different week anchors coexist here on purpose: study-hour metrics
//! use a Monday-anchored week, while the task completion rate uses a
//! Sunday-anchored week. The asymmetry is inherited application behavior
//! and is pinned by tests; do not unify the anchors.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::schedule::Task;
use crate::session::FocusSession;

use super::local_date;

/// Hours-per-day study goal shown alongside [`daily_average`].
pub const DAILY_GOAL_HOURS: f64 = 2.0;

/// The Monday..Sunday week containing `date`, inclusive on both ends.
/// Saturates at the calendar bounds instead of overflowing.
pub fn monday_week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Duration::days(date.weekday().num_days_from_monday() as i64);
    let monday = date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
    let sunday = monday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// The Sunday..Saturday week containing `date`, inclusive on both ends.
/// Saturates at the calendar bounds instead of overflowing.
pub fn sunday_week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Duration::days(date.weekday().num_days_from_sunday() as i64);
    let sunday = date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
    let saturday = sunday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    (sunday, saturday)
}

/// Raw hours studied in the Monday-anchored week `weeks_back` weeks before
/// the week containing `reference` (0 = current week). An offset that walks
/// off the calendar yields 0 hours.
pub fn weekly_hours(sessions: &[FocusSession], reference: NaiveDate, weeks_back: u32) -> f64 {
    let Some(target) = reference.checked_sub_signed(Duration::days(7 * weeks_back as i64)) else {
        return 0.0;
    };
    let (start, end) = monday_week_range(target);
    let minutes: u64 = sessions
        .iter()
        .filter(|s| {
            let date = local_date(s);
            date >= start && date <= end
        })
        .map(|s| s.duration_min as u64)
        .sum();
    minutes as f64 / 60.0
}

pub fn weekly_hours_now(sessions: &[FocusSession], weeks_back: u32) -> f64 {
    weekly_hours(sessions, Local::now().date_naive(), weeks_back)
}

/// Average hours studied per day across the Monday-anchored week containing
/// `reference`. The divisor is the full 7 days, not the days elapsed so far.
pub fn daily_average(sessions: &[FocusSession], reference: NaiveDate) -> f64 {
    weekly_hours(sessions, reference, 0) / 7.0
}

pub fn daily_average_today(sessions: &[FocusSession]) -> f64 {
    daily_average(sessions, Local::now().date_naive())
}

/// Percentage change of this week's hours against last week's.
/// Defined as 0 when the prior week recorded nothing.
pub fn week_over_week_change(sessions: &[FocusSession], reference: NaiveDate) -> f64 {
    let current = weekly_hours(sessions, reference, 0);
    let prior = weekly_hours(sessions, reference, 1);
    if prior == 0.0 {
        return 0.0;
    }
    (current - prior) / prior * 100.0
}

/// Percentage of tasks completed among those due in the Sunday-anchored
/// week containing `reference`, rounded to the nearest integer.
/// An empty window yields 0, never a division error.
pub fn weekly_completion_rate(tasks: &[Task], reference: NaiveDate) -> u32 {
    let (start, end) = sunday_week_range(reference);
    let in_week: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date >= start && t.due_date <= end)
        .collect();
    if in_week.is_empty() {
        return 0;
    }
    let done = in_week.iter().filter(|t| t.is_done()).count();
    (done as f64 / in_week.len() as f64 * 100.0).round() as u32
}
