//! Finder error types.

/// Errors from parsing finder controls supplied by clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinderError {
    /// Sort field name not recognised
    #[error("unknown sort field: {0:?}")]
    UnknownSortField(String),
}
