//! Route records and their component types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::magnitude::leading_magnitude;

/// Unique identifier of a route within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An accessibility score between 0 and 100 inclusive.
///
/// # Examples
///
/// ```
/// use route_server::domain::AccessScore;
///
/// let score = AccessScore::new(98).unwrap();
/// assert_eq!(score.value(), 98);
///
/// assert!(AccessScore::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AccessScore(u8);

impl AccessScore {
    /// Highest possible score.
    pub const MAX: u8 = 100;

    /// Create a score, rejecting values above [`AccessScore::MAX`].
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Create a score, clamping values above [`AccessScore::MAX`].
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AccessScore {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessScore> for u8 {
    fn from(score: AccessScore) -> Self {
        score.0
    }
}

impl fmt::Display for AccessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The kind of travel a route involves.
///
/// The three well-known categories get their own variants; anything else is
/// kept verbatim so data files can introduce new kinds without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    PublicTransit,
    WalkingRolling,
    Shuttle,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::PublicTransit => "Public Transit",
            Category::WalkingRolling => "Walking/Rolling",
            Category::Shuttle => "Shuttle",
            Category::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Public Transit" => Category::PublicTransit,
            "Walking/Rolling" => Category::WalkingRolling,
            "Shuttle" => Category::Shuttle,
            _ => Category::Other(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode of transport used along a route.
///
/// The presentation layer maps each mode to an icon; the domain only
/// records which modes are involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Train,
    Bus,
    Walk,
}

/// A single point-to-point accessible travel option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
    /// Free text with a leading magnitude, e.g. "18 mins".
    pub duration: String,
    /// Free text with a leading magnitude, e.g. "1.2 km".
    pub distance: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub modes: Vec<TransportMode>,
    pub score: AccessScore,
    #[serde(default)]
    pub features: Vec<String>,
    /// Tags matched against requirement tags when filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: String,
    #[serde(default)]
    pub description: String,
}

impl Route {
    /// Duration magnitude, or `None` if the text has no number in it.
    pub fn duration_value(&self) -> Option<f64> {
        leading_magnitude(&self.duration)
    }

    /// Distance magnitude, or `None` if the text has no number in it.
    pub fn distance_value(&self) -> Option<f64> {
        leading_magnitude(&self.distance)
    }

    /// Whether the route carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the route lists the given feature (exact match).
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Whether the route reports no disruption.
    pub fn is_clear(&self) -> bool {
        self.status == "Clear"
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::route;
    use super::*;

    #[test]
    fn score_bounds() {
        assert!(AccessScore::new(0).is_ok());
        assert!(AccessScore::new(100).is_ok());
        assert_eq!(
            AccessScore::new(101).unwrap_err(),
            DomainError::ScoreOutOfRange(101)
        );
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(AccessScore::saturating(250).value(), 100);
        assert_eq!(AccessScore::saturating(40).value(), 40);
    }

    #[test]
    fn score_display_has_percent() {
        assert_eq!(AccessScore::new(85).unwrap().to_string(), "85%");
    }

    #[test]
    fn category_known_names() {
        assert_eq!(Category::from("Shuttle"), Category::Shuttle);
        assert_eq!(Category::from("Public Transit"), Category::PublicTransit);
        assert_eq!(Category::from("Walking/Rolling"), Category::WalkingRolling);
    }

    #[test]
    fn category_free_text_is_preserved() {
        let category = Category::from("Ferry");
        assert_eq!(category, Category::Other("Ferry".to_string()));
        assert_eq!(category.as_str(), "Ferry");
    }

    #[test]
    fn deserialize_route_json() {
        let json = r#"{
            "id": 7,
            "origin": "Quay",
            "destination": "Market",
            "duration": "9 mins",
            "distance": "0.5 km",
            "type": "Ferry",
            "modes": ["walk"],
            "score": 77,
            "features": ["Ramp"],
            "tags": ["Wheelchair"],
            "status": "Clear",
            "description": "Short hop."
        }"#;

        let route: Route = serde_json::from_str(json).unwrap();
        assert_eq!(route.id, RouteId(7));
        assert_eq!(route.category, Category::Other("Ferry".to_string()));
        assert_eq!(route.modes, vec![TransportMode::Walk]);
        assert_eq!(route.score.value(), 77);
        assert_eq!(route.duration_value(), Some(9.0));
        assert_eq!(route.distance_value(), Some(0.5));
    }

    #[test]
    fn deserialize_rejects_out_of_range_score() {
        let json = r#"{
            "id": 1, "origin": "A", "destination": "B",
            "duration": "1 min", "distance": "1 km", "type": "Shuttle",
            "score": 150, "status": "Clear"
        }"#;
        assert!(serde_json::from_str::<Route>(json).is_err());
    }

    #[test]
    fn serialized_category_uses_type_key() {
        let r = route(1, "A", "B", &[]);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["type"], "Public Transit");
        assert_eq!(value["score"], 50);
    }

    #[test]
    fn tag_and_feature_lookup_is_exact() {
        let mut r = route(1, "A", "B", &["Wheelchair"]);
        r.features.push("Hearing loops".to_string());
        assert!(r.has_tag("Wheelchair"));
        assert!(!r.has_tag("wheelchair"));
        assert!(r.has_feature("Hearing loops"));
        assert!(!r.has_feature("Braille signage"));
    }
}
