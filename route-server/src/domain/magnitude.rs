//! Extraction of numeric magnitudes from free-text measurements.

use std::sync::LazyLock;

use regex::Regex;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Return the first number embedded in `text`.
///
/// `"18 mins"` gives 18, `"1.2 km"` gives 1.2, and text without digits
/// gives `None`.
///
/// # Examples
///
/// ```
/// use route_server::domain::leading_magnitude;
///
/// assert_eq!(leading_magnitude("18 mins"), Some(18.0));
/// assert_eq!(leading_magnitude("1.2 km"), Some(1.2));
/// assert_eq!(leading_magnitude("unknown"), None);
/// ```
pub fn leading_magnitude(text: &str) -> Option<f64> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Like [`leading_magnitude`], but text without a number counts as zero.
pub fn magnitude_or_zero(text: &str) -> f64 {
    leading_magnitude(text).unwrap_or(0.0)
}
