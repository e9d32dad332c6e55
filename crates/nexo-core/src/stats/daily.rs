//! Day-scoped metrics: today's sessions, hours, Pomodoro count, and the
//! Mon..Sun breakdown of the current week.

use chrono::{Duration, Local, NaiveDate};

use crate::schedule::Task;
use crate::session::{FocusSession, SessionKind};

use super::{local_date, monday_week_range, round1};

/// Sessions whose local calendar date matches `date`.
pub fn sessions_on(sessions: &[FocusSession], date: NaiveDate) -> Vec<&FocusSession> {
    sessions.iter().filter(|s| local_date(s) == date).collect()
}

pub fn sessions_today(sessions: &[FocusSession]) -> Vec<&FocusSession> {
    sessions_on(sessions, Local::now().date_naive())
}

/// Hours studied on `date`, to 1 decimal.
pub fn study_hours_on(sessions: &[FocusSession], date: NaiveDate) -> f64 {
    let minutes: u64 = sessions_on(sessions, date)
        .iter()
        .map(|s| s.duration_min as u64)
        .sum();
    round1(minutes as f64 / 60.0)
}

pub fn study_hours_today(sessions: &[FocusSession]) -> f64 {
    study_hours_on(sessions, Local::now().date_naive())
}

/// Number of Pomodoro sessions on `date`.
pub fn pomodoros_on(sessions: &[FocusSession], date: NaiveDate) -> usize {
    sessions_on(sessions, date)
        .iter()
        .filter(|s| s.kind == SessionKind::Pomodoro)
        .count()
}

pub fn pomodoros_today(sessions: &[FocusSession]) -> usize {
    pomodoros_on(sessions, Local::now().date_naive())
}

/// Hours per weekday (Mon..Sun) within the Monday-anchored week containing
/// `reference`, each to 1 decimal. Empty input yields seven zero buckets.
pub fn daily_breakdown(sessions: &[FocusSession], reference: NaiveDate) -> [f64; 7] {
    let (monday, _) = monday_week_range(reference);
    let mut buckets = [0.0; 7];
    for (i, bucket) in buckets.iter_mut().enumerate() {
        let day = monday + Duration::days(i as i64);
        let minutes: u64 = sessions
            .iter()
            .filter(|s| local_date(s) == day)
            .map(|s| s.duration_min as u64)
            .sum();
        *bucket = round1(minutes as f64 / 60.0);
    }
    buckets
}

pub fn daily_breakdown_today(sessions: &[FocusSession]) -> [f64; 7] {
    daily_breakdown(sessions, Local::now().date_naive())
}

/// (done, total) over tasks due on `date`. Same "today" predicate the
/// session metrics use, applied to due dates.
pub fn tasks_done_on(tasks: &[Task], date: NaiveDate) -> (usize, usize) {
    let due_today: Vec<&Task> = tasks.iter().filter(|t| t.due_date == date).collect();
    let done = due_today.iter().filter(|t| t.is_done()).count();
    (done, due_today.len())
}

pub fn tasks_done_today(tasks: &[Task]) -> (usize, usize) {
    tasks_done_on(tasks, Local::now().date_naive())
}
