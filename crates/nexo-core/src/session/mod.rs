mod record;
mod store;

pub mod factory;

pub use factory::CompletedSession;
pub use record::{FocusSession, SessionKind, SessionPatch};
pub use store::SessionStore;
