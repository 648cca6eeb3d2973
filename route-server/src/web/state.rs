//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::search::{LocalStore, PersistentHistory};
use crate::session::SessionStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route and requirement data
    pub catalog: Arc<Catalog>,

    /// Live browser sessions
    pub sessions: SessionStore,

    /// Recent searches, saved to the local store
    pub history: PersistentHistory,

    /// Server configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new app state, loading history from the configured store.
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        let catalog = Arc::new(catalog);
        let config = Arc::new(config);
        let history = PersistentHistory::load(LocalStore::new(config.store_path.clone()));
        let sessions = SessionStore::new(catalog.clone(), config.clone());

        Self {
            catalog,
            sessions,
            history,
            config,
        }
    }
}
