//! Search-side error types.

use std::path::PathBuf;

/// Errors from the on-disk local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the store file failed
    #[error("local store I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file or stored value is not the expected JSON
    #[error("local store JSON error for {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from interpreting client keyboard input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Key name is not one the suggestion list reacts to
    #[error("unsupported key: {0:?}")]
    Unsupported(String),
}
