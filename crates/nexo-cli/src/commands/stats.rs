use chrono::Local;
use clap::Subcommand;
use nexo_core::{stats, LocalStore};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's dashboard numbers
    Today,
    /// All-time and current-week summary
    All,
    /// Hours in a Monday-anchored week (0 = current)
    Weekly {
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Hours per weekday (Mon..Sun) for the current week
    Breakdown,
    /// All-time per-subject distribution (top 6)
    Subjects,
}

#[derive(Serialize)]
struct TodayStats {
    sessions: usize,
    study_hours: f64,
    pomodoros: usize,
    tasks_done: usize,
    tasks_due: usize,
}

#[derive(Serialize)]
struct AllStats {
    total_study_hours: f64,
    total_sessions: usize,
    weekly_hours: f64,
    week_over_week_pct: f64,
    daily_average_hours: f64,
    daily_goal_hours: f64,
    weekly_completion_rate_pct: u32,
}

#[derive(Serialize)]
struct DayHours {
    day: &'static str,
    hours: f64,
}

const WEEKDAY_LABELS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    let data = store.load()?;
    let sessions = data.sessions.sessions();
    let today = Local::now().date_naive();

    match action {
        StatsAction::Today => {
            let (tasks_done, tasks_due) = stats::tasks_done_today(&data.tasks);
            let out = TodayStats {
                sessions: stats::sessions_today(sessions).len(),
                study_hours: stats::study_hours_today(sessions),
                pomodoros: stats::pomodoros_today(sessions),
                tasks_done,
                tasks_due,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::All => {
            let out = AllStats {
                total_study_hours: stats::total_study_hours(sessions),
                total_sessions: sessions.len(),
                weekly_hours: stats::weekly_hours(sessions, today, 0),
                week_over_week_pct: stats::week_over_week_change(sessions, today),
                daily_average_hours: stats::daily_average(sessions, today),
                daily_goal_hours: stats::DAILY_GOAL_HOURS,
                weekly_completion_rate_pct: stats::weekly_completion_rate(&data.tasks, today),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Weekly { offset } => {
            let hours = stats::weekly_hours(sessions, today, offset);
            println!("{{\"weeks_back\": {offset}, \"hours\": {hours}}}");
        }
        StatsAction::Breakdown => {
            let buckets = stats::daily_breakdown(sessions, today);
            let out: Vec<DayHours> = WEEKDAY_LABELS
                .into_iter()
                .zip(buckets)
                .map(|(day, hours)| DayHours { day, hours })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Subjects => {
            let shares = stats::subject_distribution(sessions);
            println!("{}", serde_json::to_string_pretty(&shares)?);
        }
    }
    Ok(())
}
