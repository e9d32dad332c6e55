use std::sync::{Arc, Mutex};

use clap::Subcommand;
use nexo_core::session::factory;
use nexo_core::storage::{AppData, LocalStore};
use nexo_core::{Event, Ticker, TimerEngine};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Arm the countdown (resumes a paused one)
    Start {
        /// Configure the duration before starting (clamped to 1-240)
        #[arg(long)]
        minutes: Option<i64>,
        /// Configure the subject before starting
        #[arg(long)]
        subject: Option<String>,
    },
    /// Pause the countdown, preserving the remaining time
    Pause,
    /// Disarm and restore the configured duration; no session is created
    Reset,
    /// Print current timer state as JSON (replays elapsed time first)
    Status,
    /// Stay attached, ticking at 1 Hz until the countdown completes
    Watch,
    /// Change the configured duration (only while idle)
    SetDuration { minutes: i64 },
    /// Change the subject (only while idle)
    SetSubject { subject: String },
}

/// Replay wall-clock time that passed while no process was ticking; if the
/// countdown finished in the meantime, record the session now.
fn settle(engine: &mut TimerEngine, data: &mut AppData) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(completion) = engine.catch_up() {
        let done = factory::from_completion(completion, &data.preferences);
        let event = Event::TimerCompleted {
            at: done.session.started_at,
            play_sound: done.play_sound,
            session: done.session.clone(),
        };
        data.sessions.append(done.session);
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    Ok(())
}

fn print_event(event: Option<Event>, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        // Command did not apply in the current state; show where we are.
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    let mut data = store.load()?;
    let mut engine = data.timer.take().unwrap_or_default();
    settle(&mut engine, &mut data)?;

    match action {
        TimerAction::Start { minutes, subject } => {
            if let Some(minutes) = minutes {
                if let Some(event) = engine.set_duration(minutes) {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
            if let Some(subject) = subject {
                engine.set_subject(subject);
            }
            let event = engine.start();
            print_event(event, &engine)?;
        }
        TimerAction::Pause => {
            let event = engine.pause();
            print_event(event, &engine)?;
        }
        TimerAction::Reset => {
            let event = engine.reset();
            print_event(event, &engine)?;
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Watch => {
            engine = watch(engine, &mut data)?;
        }
        TimerAction::SetDuration { minutes } => {
            let event = engine.set_duration(minutes);
            print_event(event, &engine)?;
        }
        TimerAction::SetSubject { subject } => {
            let event = engine.set_subject(subject);
            print_event(event, &engine)?;
        }
    }

    data.timer = Some(engine);
    store.save(&data)?;
    Ok(())
}

/// Drive the engine with the 1 Hz ticker until the countdown completes,
/// then record the session.
fn watch(
    mut engine: TimerEngine,
    data: &mut AppData,
) -> Result<TimerEngine, Box<dyn std::error::Error>> {
    // A countdown left running by a previous process has no live ticker;
    // re-arm it from its preserved remaining time.
    if engine.is_armed() {
        engine.pause();
    }

    let shared = Arc::new(Mutex::new(engine));
    let (mut ticker, mut completions) = Ticker::new(Arc::clone(&shared));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        if let Some(event) = ticker.arm() {
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        if let Some(completion) = completions.recv().await {
            let done = factory::from_completion(completion, &data.preferences);
            let event = Event::TimerCompleted {
                at: done.session.started_at,
                play_sound: done.play_sound,
                session: done.session.clone(),
            };
            data.sessions.append(done.session);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    drop(ticker);

    let engine = match shared.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    Ok(engine)
}
