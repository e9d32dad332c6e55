mod engine;
mod ticker;

pub mod duration;

pub use duration::{Advisory, MAX_DURATION_MIN, MIN_DURATION_MIN, POMODORO_MIN};
pub use engine::{TimerCompletion, TimerEngine, TimerState};
pub use ticker::Ticker;
