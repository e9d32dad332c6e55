//! 1 Hz driver for the timer engine.
//!
//! The engine itself owns no thread; [`Ticker`] binds it to a single tokio
//! interval task while armed. Leaving the running state (pause, reset,
//! completion, drop) cancels the task synchronously, so there is never more
//! than one live callback decrementing the countdown.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::engine::{TimerCompletion, TimerEngine};
use crate::events::Event;

/// Drives a shared [`TimerEngine`] at one tick per second while armed.
///
/// Completions are delivered on the channel handed out by [`Ticker::new`];
/// the receiving side is expected to run them through the session factory.
pub struct Ticker {
    engine: Arc<Mutex<TimerEngine>>,
    completions: UnboundedSender<TimerCompletion>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Wrap an engine. Returns the ticker and the completion channel.
    pub fn new(
        engine: Arc<Mutex<TimerEngine>>,
    ) -> (Self, UnboundedReceiver<TimerCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                engine,
                completions: tx,
                handle: None,
            },
            rx,
        )
    }

    pub fn engine(&self) -> &Arc<Mutex<TimerEngine>> {
        &self.engine
    }

    /// Whether a ticking task is currently live.
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Arm the engine and spawn the 1 Hz task. Returns `None` (and spawns
    /// nothing) if the engine was already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) -> Option<Event> {
        let event = lock(&self.engine).start()?;
        // A previous task can only be a finished one here, but make sure.
        self.cancel_task();

        let engine = Arc::clone(&self.engine);
        let completions = self.completions.clone();
        self.handle = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(
                tokio::time::Instant::now() + period,
                period,
            );
            loop {
                interval.tick().await;
                let completion = lock(&engine).tick();
                if let Some(completion) = completion {
                    // The engine disarmed itself; this task's work is done.
                    let _ = completions.send(completion);
                    break;
                }
            }
        }));
        Some(event)
    }

    /// Cancel the ticking task, then pause the engine.
    pub fn pause(&mut self) -> Option<Event> {
        self.cancel_task();
        lock(&self.engine).pause()
    }

    /// Cancel the ticking task, then reset the engine.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_task();
        lock(&self.engine).reset()
    }

    fn cancel_task(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

/// Lock the engine, recovering the guard if a panicking holder poisoned it.
fn lock(engine: &Arc<Mutex<TimerEngine>>) -> MutexGuard<'_, TimerEngine> {
    match engine.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
