//! Server configuration.
//!
//! Every setting has a default; environment variables override them at
//! startup. Builder-style setters exist for tests and embedding.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::search::{DEFAULT_DEBOUNCE, DEFAULT_MIN_CHARS};

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the route finder server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Optional catalog JSON file. The built-in sample data is used when unset.
    pub data_path: Option<PathBuf>,

    /// File holding persisted client state (search history).
    pub store_path: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Sessions idle for longer than this are dropped.
    pub session_idle: Duration,

    /// Maximum number of live sessions.
    pub max_sessions: u64,

    /// Quiet period before typed search input is applied.
    pub debounce: Duration,

    /// Minimum input length before autocomplete suggests anything.
    pub autocomplete_min_chars: usize,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("INCLUSIVEGO_ADDR") {
            config.addr = parse_var("INCLUSIVEGO_ADDR", &value)?;
        }
        if let Some(value) = lookup("INCLUSIVEGO_DATA").filter(|v| !v.is_empty()) {
            config.data_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("INCLUSIVEGO_STORE").filter(|v| !v.is_empty()) {
            config.store_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("INCLUSIVEGO_STATIC").filter(|v| !v.is_empty()) {
            config.static_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("INCLUSIVEGO_SESSION_IDLE_SECS") {
            let secs: u64 = parse_var("INCLUSIVEGO_SESSION_IDLE_SECS", &value)?;
            config.session_idle = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("INCLUSIVEGO_DEBOUNCE_MS") {
            let ms: u64 = parse_var("INCLUSIVEGO_DEBOUNCE_MS", &value)?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(value) = lookup("INCLUSIVEGO_AUTOCOMPLETE_MIN_CHARS") {
            config.autocomplete_min_chars =
                parse_var("INCLUSIVEGO_AUTOCOMPLETE_MIN_CHARS", &value)?;
        }

        Ok(config)
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    pub fn with_autocomplete_min_chars(mut self, min_chars: usize) -> Self {
        self.autocomplete_min_chars = min_chars;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: None,
            store_path: PathBuf::from("inclusivego_store.json"),
            static_dir: PathBuf::from("static"),
            session_idle: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
            debounce: DEFAULT_DEBOUNCE,
            autocomplete_min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
