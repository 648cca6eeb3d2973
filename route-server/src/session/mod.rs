//! Browser sessions.
//!
//! Each browser gets its own [`SessionState`], found through an opaque
//! cookie and dropped after a period of inactivity.

mod state;
mod store;

pub use state::SessionState;
pub use store::{SessionHandle, SessionId, SessionStore};
