//! Idle-expiring session storage.
//!
//! Sessions live in memory only. A session unused for longer than the
//! configured idle period is evicted and the browser starts afresh on its
//! next request.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::state::SessionState;
use crate::catalog::Catalog;
use crate::config::AppConfig;

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Length of a generated id once encoded.
    const ENCODED_LEN: usize = 22;

    /// Accept a client-supplied id if it could have been generated by us.
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == Self::ENCODED_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(s.to_string()))
    }

    /// A fresh id from 16 random bytes.
    pub fn generate() -> Self {
        Self(URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All live sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: MokaCache<SessionId, SessionHandle>,
    catalog: Arc<Catalog>,
    config: Arc<AppConfig>,
}

impl SessionStore {
    pub fn new(catalog: Arc<Catalog>, config: Arc<AppConfig>) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.session_idle)
            .max_capacity(config.max_sessions)
            .build();

        Self {
            sessions,
            catalog,
            config,
        }
    }

    /// Look up a session, or start a new one if the id is absent, malformed
    /// or expired.
    ///
    /// The returned flag is true when a new session was created and the
    /// client needs to be told its id.
    pub async fn get_or_create(&self, id: Option<&str>) -> (SessionId, SessionHandle, bool) {
        if let Some(id) = id.and_then(SessionId::parse) {
            if let Some(handle) = self.sessions.get(&id).await {
                return (id, handle, false);
            }
        }

        let id = SessionId::generate();
        let state = SessionState::new(&self.catalog, &self.config);
        let handle = Arc::new(Mutex::new(state));
        self.sessions.insert(id.clone(), handle.clone()).await;

        debug!(session = %id, live = self.sessions.entry_count(), "session created");
        (id, handle, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(Catalog::seed()), Arc::new(AppConfig::default()))
    }

    #[test]
    fn generated_ids_are_distinct_and_parse() {
        let a = SessionId::generate();
        let b = SessionId::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), SessionId::ENCODED_LEN);
        assert_eq!(SessionId::parse(a.as_str()), Some(a));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert_eq!(SessionId::parse(""), None);
        assert_eq!(SessionId::parse("short"), None);
        assert_eq!(SessionId::parse("aaaaaaaaaaaaaaaaaaaaa;"), None);
    }

    #[tokio::test]
    async fn new_session_when_no_cookie() {
        let store = store();
        let (_, _, created) = store.get_or_create(None).await;
        assert!(created);
    }

    #[tokio::test]
    async fn existing_session_is_reused() {
        let store = store();
        let (id, handle, _) = store.get_or_create(None).await;
        handle.lock().await.selection.select(&Catalog::seed(), RouteId(3));

        let (again, handle, created) = store.get_or_create(Some(id.as_str())).await;
        assert!(!created);
        assert_eq!(again, id);
        assert_eq!(handle.lock().await.selection.selected(), Some(RouteId(3)));
    }

    #[tokio::test]
    async fn unknown_id_starts_fresh_session() {
        let store = store();
        let (id, _, created) = store
            .get_or_create(Some("AAAAAAAAAAAAAAAAAAAAAA"))
            .await;
        assert!(created);
        assert_ne!(id.as_str(), "AAAAAAAAAAAAAAAAAAAAAA");
    }
}
