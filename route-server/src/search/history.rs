//! Recent search history.
//!
//! [`SearchHistory`] is the bounded, most-recent-first list itself.
//! [`PersistentHistory`] wraps it for sharing between requests and mirrors
//! every change into a [`LocalStore`]. Persistence failures are logged and
//! never reach the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::local_store::LocalStore;

/// Key the history is stored under.
pub const HISTORY_STORAGE_KEY: &str = "inclusiveGO_recentSearches";

/// Maximum number of remembered queries.
pub const MAX_HISTORY_ITEMS: usize = 5;

/// Most-recent-first list of distinct queries.
///
/// Queries are compared case-insensitively; re-adding a query moves it to
/// the front with the newest casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, enforcing the bound and uniqueness.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries.into_iter().rev() {
            history.add(&entry);
        }
        history
    }

    /// Record a query. Blank queries are ignored.
    ///
    /// Returns whether the history changed.
    pub fn add(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        let before = self.entries.clone();
        let lowered = query.to_lowercase();
        self.entries.retain(|e| e.to_lowercase() != lowered);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_HISTORY_ITEMS);
        self.entries != before
    }

    /// Remove a query (case-insensitive). Returns whether anything was removed.
    pub fn remove(&mut self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        let len = self.entries.len();
        self.entries.retain(|e| e.to_lowercase() != lowered);
        self.entries.len() != len
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Search history shared across sessions and saved after every change.
#[derive(Debug, Clone)]
pub struct PersistentHistory {
    inner: Arc<RwLock<SearchHistory>>,
    store: LocalStore,
}

impl PersistentHistory {
    /// Load the history from the store.
    ///
    /// Any failure leaves the history empty.
    pub fn load(store: LocalStore) -> Self {
        let history = match store.get::<Vec<String>>(HISTORY_STORAGE_KEY) {
            Ok(Some(entries)) => SearchHistory::from_entries(entries),
            Ok(None) => SearchHistory::new(),
            Err(e) => {
                warn!(error = %e, path = %store.path().display(), "error loading search history");
                SearchHistory::new()
            }
        };

        debug!(entries = history.len(), "search history loaded");

        Self {
            inner: Arc::new(RwLock::new(history)),
            store,
        }
    }

    /// Snapshot of the current entries.
    pub async fn entries(&self) -> Vec<String> {
        self.inner.read().await.entries().to_vec()
    }

    pub async fn add(&self, query: &str) {
        let mut guard = self.inner.write().await;
        if guard.add(query) {
            self.save(&guard);
        }
    }

    pub async fn remove(&self, query: &str) {
        let mut guard = self.inner.write().await;
        if guard.remove(query) {
            self.save(&guard);
        }
    }

    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.clear();
        self.save(&guard);
    }

    fn save(&self, history: &SearchHistory) {
        if let Err(e) = self.store.set(HISTORY_STORAGE_KEY, history) {
            warn!(error = %e, "error saving search history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn latest_casing_wins() {
        let mut history = SearchHistory::new();
        history.add("museum");
        history.add("Museum");
        assert_eq!(history.entries(), &["Museum".to_string()]);
    }

    #[test]
    fn most_recent_first_and_bounded() {
        let mut history = SearchHistory::new();
        for q in ["a", "b", "c", "d", "e", "f"] {
            history.add(q);
        }
        assert_eq!(history.entries(), &["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn readding_moves_to_front() {
        let mut history = SearchHistory::new();
        history.add("park");
        history.add("plaza");
        history.add("PARK");
        assert_eq!(history.entries(), &["PARK", "plaza"]);
    }

    #[test]
    fn blank_and_padded_queries() {
        let mut history = SearchHistory::new();
        assert!(!history.add("   "));
        history.add("  harbor  ");
        assert_eq!(history.entries(), &["harbor"]);
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut history = SearchHistory::new();
        history.add("Library");
        history.add("Park");
        assert!(history.remove("library"));
        assert!(!history.remove("library"));
        assert_eq!(history.entries(), &["Park"]);
    }

    #[test]
    fn from_entries_restores_order_and_bound() {
        let stored: Vec<String> = ["g", "f", "e", "d", "c", "b", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let history = SearchHistory::from_entries(stored);
        assert_eq!(history.entries(), &["g", "f", "e", "d", "c"]);
    }

    #[tokio::test]
    async fn persists_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let history = PersistentHistory::load(LocalStore::new(&path));
        history.add("museum").await;
        history.add("Harbor").await;

        let reloaded = PersistentHistory::load(LocalStore::new(&path));
        assert_eq!(reloaded.entries().await, vec!["Harbor", "museum"]);

        reloaded.remove("MUSEUM").await;
        let again = PersistentHistory::load(LocalStore::new(&path));
        assert_eq!(again.entries().await, vec!["Harbor"]);

        again.clear().await;
        let empty = PersistentHistory::load(LocalStore::new(&path));
        assert!(empty.entries().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_store_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "garbage").unwrap();

        let history = PersistentHistory::load(LocalStore::new(&path));
        assert!(history.entries().await.is_empty());
    }

    #[tokio::test]
    async fn save_failure_keeps_in_memory_update() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("store.json");
        std::fs::create_dir(&path).unwrap();

        let history = PersistentHistory::load(LocalStore::new(&path));
        history.add("museum").await;
        assert_eq!(history.entries().await, vec!["museum"]);
    }
}
