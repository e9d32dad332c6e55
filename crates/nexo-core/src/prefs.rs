//! User preference flags.
//!
//! Preferences are part of the persisted JSON bundle and are passed
//! explicitly to the components that read them (the session factory checks
//! `timer_sound` at the instant of completion). They are never ambient state.

use serde::{Deserialize, Serialize};

/// The three user preference toggles, all on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub timer_sound: bool,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            timer_sound: true,
            dark_mode: true,
        }
    }
}

fn default_true() -> bool {
    true
}
