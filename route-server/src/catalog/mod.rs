//! The route catalog: static route and requirement data, plus the
//! per-session selections made over it.
//!
//! Data comes either from the built-in seed or from a JSON file given at
//! startup. Once built the catalog is never mutated.

mod error;
mod seed;
mod selection;
mod store;

pub use error::CatalogError;
pub use seed::{DEFAULT_ACTIVE_REQUIREMENTS, seed_requirements, seed_routes};
pub use selection::{ActiveRequirements, RouteSelection};
pub use store::Catalog;
