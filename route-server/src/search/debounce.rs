//! Quiet-period debouncing for the free-text search box.

use std::time::{Duration, Instant};

/// Default quiet period before typed input becomes the committed query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tracks typed input and decides when it becomes the committed query.
///
/// Each call to [`Debouncer::input`] restarts the quiet period. The caller
/// supplies the clock so the state machine stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
    committed: String,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            committed: String::new(),
        }
    }

    /// Record a keystroke.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now));
    }

    /// Commit pending input whose quiet period has elapsed.
    ///
    /// Returns whether the committed query changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quiet);
        if !ready {
            return false;
        }
        match self.pending.take() {
            Some((text, _)) if text != self.committed => {
                self.committed = text;
                true
            }
            _ => false,
        }
    }

    /// Commit `text` immediately, dropping any pending input.
    pub fn commit_now(&mut self, text: &str) {
        self.pending = None;
        self.committed = text.to_string();
    }

    /// The query filtering currently uses.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Typed text still inside its quiet period.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|(text, _)| text.as_str())
    }

    /// What the search box shows: pending text if any, else the committed query.
    pub fn display_text(&self) -> &str {
        self.pending().unwrap_or(&self.committed)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn commits_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::default();

        d.input("cen", start);
        assert!(!d.settle(start + ms(299)));
        assert_eq!(d.committed(), "");
        assert_eq!(d.display_text(), "cen");

        assert!(d.settle(start + ms(300)));
        assert_eq!(d.committed(), "cen");
        assert_eq!(d.pending(), None);
    }

    #[test]
    fn each_keystroke_restarts_timer() {
        let start = Instant::now();
        let mut d = Debouncer::default();

        d.input("c", start);
        d.input("ce", start + ms(200));
        assert!(!d.settle(start + ms(400)));
        assert!(d.settle(start + ms(500)));
        assert_eq!(d.committed(), "ce");
    }

    #[test]
    fn commit_now_skips_the_wait() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        d.input("park", start);
        d.commit_now("park");
        assert_eq!(d.committed(), "park");
        assert!(!d.settle(start + ms(1000)));
    }

    #[test]
    fn settling_same_text_reports_no_change() {
        let start = Instant::now();
        let mut d = Debouncer::new(ms(10));
        d.commit_now("plaza");
        d.input("plaza", start);
        assert!(!d.settle(start + ms(10)));
        assert_eq!(d.pending(), None);
    }

    #[test]
    fn clock_going_backwards_does_not_commit() {
        let start = Instant::now() + ms(1000);
        let mut d = Debouncer::default();
        d.input("x", start);
        assert!(!d.settle(start - ms(500)));
    }
}
