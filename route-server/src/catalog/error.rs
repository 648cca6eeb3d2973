//! Catalog error types.

use std::path::PathBuf;

use crate::domain::{RequirementId, RouteId};

/// Errors that can occur while loading the route catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Data file could not be read
    #[error("failed to read catalog file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not valid catalog JSON
    #[error("failed to parse catalog file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two routes share an identifier
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),

    /// Two requirements share an identifier
    #[error("duplicate requirement id {0}")]
    DuplicateRequirement(RequirementId),

    /// Catalog has no routes at all
    #[error("catalog contains no routes")]
    NoRoutes,
}
