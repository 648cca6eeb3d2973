//! Free-text search support: location autocomplete, input debouncing and
//! the persisted recent-search history.

mod autocomplete;
mod debounce;
mod error;
mod history;
mod local_store;

pub use autocomplete::{
    Autocomplete, DEFAULT_MIN_CHARS, Key, location_candidates, suggest,
};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{KeyError, StoreError};
pub use history::{HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS, PersistentHistory, SearchHistory};
pub use local_store::LocalStore;
