//! # Nexo Core Library
//!
//! Core business logic for Nexo's focus timer and session accounting: the
//! countdown engine, session records, and the study metrics derived from
//! them. The UI layer is a thin shell over this crate; the bundled CLI
//! binary exposes the same operations directly.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a caller-driven countdown state machine; a tokio
//!   [`Ticker`] binds it to exactly one 1 Hz callback while armed
//! - **Sessions**: newest-first record store plus the factory that turns
//!   timer completions into records
//! - **Stats**: pure aggregator functions over the session collection and
//!   an explicit reference date
//! - **Storage**: a single JSON snapshot written to the local data directory
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine with the [1, 240] clamp policy
//! - [`SessionStore`]: append/update/remove collection of [`FocusSession`]s
//! - [`LocalStore`]: JSON persistence for the whole app bundle

pub mod error;
pub mod events;
pub mod prefs;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{CoreError, StorageError, ValidationError};
pub use events::Event;
pub use prefs::Preferences;
pub use schedule::{Task, TaskStatus};
pub use session::{CompletedSession, FocusSession, SessionKind, SessionPatch, SessionStore};
pub use storage::{AppData, LocalStore};
pub use timer::{Advisory, Ticker, TimerCompletion, TimerEngine, TimerState};
