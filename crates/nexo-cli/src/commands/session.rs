use chrono::{DateTime, Utc};
use clap::Subcommand;
use nexo_core::{LocalStore, SessionPatch, ValidationError};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions, newest first
    List {
        /// Show at most this many
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Log a finished session directly, bypassing the timer
    Log {
        #[arg(long)]
        subject: String,
        /// Duration in minutes (clamped to 1-240)
        #[arg(long)]
        minutes: i64,
    },
    /// Replace subject, timestamp, and duration of an existing session
    Edit {
        id: Uuid,
        #[arg(long)]
        subject: String,
        /// Start timestamp, RFC 3339 (e.g. 2024-05-15T09:30:00Z)
        #[arg(long)]
        at: String,
        #[arg(long)]
        minutes: i64,
    },
    /// Delete a session (destructive, no undo)
    Remove { id: Uuid },
}

fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationError::InvalidTimestamp {
            input: input.to_string(),
            message: e.to_string(),
        })
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    let mut data = store.load()?;

    match action {
        SessionAction::List { limit } => {
            let limit = limit.unwrap_or(usize::MAX);
            let recent = data.sessions.recent(limit);
            println!("{}", serde_json::to_string_pretty(&recent)?);
            return Ok(());
        }
        SessionAction::Log { subject, minutes } => {
            let session = data.sessions.log(subject, minutes, Utc::now()).clone();
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::Edit {
            id,
            subject,
            at,
            minutes,
        } => {
            let patch = SessionPatch {
                subject,
                started_at: parse_timestamp(&at)?,
                duration_min: minutes,
            };
            if data.sessions.update(id, patch) {
                let session = data.sessions.get(id).cloned();
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                // Missing id is a no-op, not an error.
                println!("{{\"type\": \"not_found\", \"id\": \"{id}\"}}");
            }
        }
        SessionAction::Remove { id } => {
            if data.sessions.remove(id) {
                println!("{{\"type\": \"session_removed\", \"id\": \"{id}\"}}");
            } else {
                println!("{{\"type\": \"not_found\", \"id\": \"{id}\"}}");
            }
        }
    }

    store.save(&data)?;
    Ok(())
}
