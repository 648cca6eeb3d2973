//! Tracing subscriber initialization.
//!
//! Filter directives come from, in order:
//!
//! 1. `INCLUSIVEGO_LOG` (e.g. `route_server=debug,info`)
//! 2. `RUST_LOG`
//! 3. `info`

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Level used when neither variable gives a usable filter.
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber, writing to stderr.
///
/// Call once, first thing in `main`.
pub fn init() {
    let filter = build_env_filter(std::env::var("INCLUSIVEGO_LOG").ok().as_deref());

    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// An unparseable `INCLUSIVEGO_LOG` falls through to `RUST_LOG`.
fn build_env_filter(project_directives: Option<&str>) -> EnvFilter {
    if let Some(filter) = project_directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(DEFAULT_DIRECTIVE)
}
