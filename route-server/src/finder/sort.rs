//! Route ordering by score, duration or distance.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Route, magnitude_or_zero};

use super::error::FinderError;

/// Field to sort routes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Score,
    Duration,
    Distance,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Score, SortField::Duration, SortField::Distance];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Score => "score",
            SortField::Duration => "duration",
            SortField::Distance => "distance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Score => "Score",
            SortField::Duration => "Duration",
            SortField::Distance => "Distance",
        }
    }

    /// Direction that puts the best routes first: higher score, shorter
    /// duration, shorter distance.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortField::Score => SortDirection::Descending,
            SortField::Duration | SortField::Distance => SortDirection::Ascending,
        }
    }

    fn compare(self, a: &Route, b: &Route) -> Ordering {
        match self {
            SortField::Score => a.score.cmp(&b.score),
            SortField::Duration => {
                magnitude_or_zero(&a.duration).total_cmp(&magnitude_or_zero(&b.duration))
            }
            SortField::Distance => {
                magnitude_or_zero(&a.distance).total_cmp(&magnitude_or_zero(&b.distance))
            }
        }
    }
}

impl FromStr for SortField {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(SortField::Score),
            "duration" => Ok(SortField::Duration),
            "distance" => Ok(SortField::Distance),
            _ => Err(FinderError::UnknownSortField(s.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Low to High",
            SortDirection::Descending => "High to Low",
        }
    }
}

/// The current sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Change the field, resetting the direction to the field's default.
    pub fn set_field(&mut self, field: SortField) {
        self.field = field;
        self.direction = field.default_direction();
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    /// Sort routes according to this state.
    pub fn apply<'a>(&self, routes: impl IntoIterator<Item = &'a Route>) -> Vec<&'a Route> {
        sort_routes(routes, self.field, self.direction)
    }
}

impl Default for SortState {
    fn default() -> Self {
        let field = SortField::default();
        Self {
            field,
            direction: field.default_direction(),
        }
    }
}

/// Return the routes in a new, stably sorted order.
///
/// Routes that compare equal keep their relative input order in both
/// directions.
pub fn sort_routes<'a>(
    routes: impl IntoIterator<Item = &'a Route>,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Route> {
    let mut sorted: Vec<&Route> = routes.into_iter().collect();
    sorted.sort_by(|a, b| {
        let ord = field.compare(a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(routes: &[&Route]) -> Vec<u32> {
        routes.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn default_state_is_score_descending() {
        let state = SortState::default();
        assert_eq!(state.field, SortField::Score);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn changing_field_resets_direction() {
        let mut state = SortState::default();
        state.set_field(SortField::Duration);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle_direction();
        state.set_field(SortField::Distance);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.set_field(SortField::Score);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn score_descending_then_toggled() {
        let catalog = Catalog::seed();
        let mut state = SortState::default();
        let sorted = state.apply(catalog.routes());
        let scores: Vec<u8> = sorted.iter().map(|r| r.score.value()).collect();
        assert_eq!(scores, vec![98, 92, 85]);

        state.toggle_direction();
        let sorted = state.apply(catalog.routes());
        let scores: Vec<u8> = sorted.iter().map(|r| r.score.value()).collect();
        assert_eq!(scores, vec![85, 92, 98]);
    }

    #[test]
    fn duration_ascending_puts_shortest_first() {
        let catalog = Catalog::seed();
        let sorted = sort_routes(catalog.routes(), SortField::Duration, SortDirection::Ascending);
        assert_eq!(sorted[0].duration, "12 mins");
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn distance_uses_decimal_magnitude() {
        let catalog = Catalog::seed();
        let sorted = sort_routes(catalog.routes(), SortField::Distance, SortDirection::Descending);
        let distances: Vec<&str> = sorted.iter().map(|r| r.distance.as_str()).collect();
        assert_eq!(distances, vec!["1.8 km", "1.2 km", "0.8 km"]);
    }

    #[test]
    fn unparseable_duration_sorts_as_zero() {
        let catalog = Catalog::seed();
        let mut routes = catalog.routes().to_vec();
        routes[1].duration = "unknown".to_string();
        let sorted = sort_routes(&routes, SortField::Duration, SortDirection::Ascending);
        assert_eq!(sorted[0].id.0, 2);
    }

    #[test]
    fn parse_sort_field() {
        assert_eq!("distance".parse::<SortField>().unwrap(), SortField::Distance);
        assert!(matches!(
            "speed".parse::<SortField>(),
            Err(FinderError::UnknownSortField(_))
        ));
    }

    #[test]
    fn direction_serializes_short_names() {
        assert_eq!(
            serde_json::to_value(SortDirection::Ascending).unwrap(),
            "asc"
        );
        assert_eq!(
            serde_json::from_str::<SortDirection>("\"desc\"").unwrap(),
            SortDirection::Descending
        );
    }
}
