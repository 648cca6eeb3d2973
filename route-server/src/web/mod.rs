//! Web layer for the route finder.
//!
//! Serves the HTML pages, the JSON API and the per-session form endpoints.

mod dto;
mod icons;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use icons::{Icon, mode_icon, requirement_icon};
pub use routes::{AppError, CurrentSession, SESSION_COOKIE, create_router};
pub use state::AppState;
pub use templates::*;
