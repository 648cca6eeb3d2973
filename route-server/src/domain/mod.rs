//! Domain types for the accessible route finder.
//!
//! Routes, requirements and display settings. Types validate their
//! invariants at construction time, so code that receives them can trust
//! their contents. Nothing here knows about rendering.

mod error;
mod magnitude;
mod requirement;
mod route;
mod settings;

pub use error::DomainError;
pub use magnitude::{leading_magnitude, magnitude_or_zero};
pub use requirement::{Requirement, RequirementId, RequirementSymbol};
pub use route::{AccessScore, Category, Route, RouteId, TransportMode};
pub use settings::{AccessibilitySettings, ContrastMode, FontSize};

#[cfg(test)]
pub(crate) use route::test_support;
