//! Side-by-side comparison of up to three routes.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::{Route, RouteId};

/// Maximum number of routes in a comparison.
pub const MAX_COMPARISON_ROUTES: usize = 3;

/// What happened when a route was toggled for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The selection was full; nothing changed.
    Rejected,
}

/// Ordered set of route ids chosen for comparison, at most
/// [`MAX_COMPARISON_ROUTES`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComparisonSelector {
    ids: Vec<RouteId>,
}

impl ComparisonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the route if absent, remove it if present.
    ///
    /// Adding to a full selection is a no-op; removing always works.
    pub fn toggle(&mut self, id: RouteId) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|&i| i == id) {
            self.ids.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.ids.len() >= MAX_COMPARISON_ROUTES {
            return ToggleOutcome::Rejected;
        }
        self.ids.push(id);
        ToggleOutcome::Added
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[RouteId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: RouteId) -> bool {
        self.ids.contains(&id)
    }

    /// At least two routes are selected.
    pub fn can_compare(&self) -> bool {
        self.ids.len() >= 2
    }

    /// The selection is full; further additions are disabled.
    pub fn is_at_limit(&self) -> bool {
        self.ids.len() >= MAX_COMPARISON_ROUTES
    }

    /// Resolve ids to routes in selection order, skipping unknown ids.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Route> {
        self.ids.iter().filter_map(|&id| catalog.route(id)).collect()
    }
}

/// Whether smaller or larger values win a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    HigherIsBetter,
    LowerIsBetter,
}

/// Index of the single best value.
///
/// Unparseable values (`None`) are left out. If nothing is left, or the best
/// value is shared by more than one route, there is no winner.
pub fn best_index(values: &[Option<f64>], preference: Preference) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    let mut tied = false;

    for (i, value) in values.iter().enumerate() {
        let Some(v) = *value else { continue };
        match best {
            None => best = Some((i, v)),
            Some((_, b)) => {
                let better = match preference {
                    Preference::HigherIsBetter => v > b,
                    Preference::LowerIsBetter => v < b,
                };
                if better {
                    best = Some((i, v));
                    tied = false;
                } else if v == b {
                    tied = true;
                }
            }
        }
    }

    if tied { None } else { best.map(|(i, _)| i) }
}

/// Which compared metric a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Score,
    Duration,
    Distance,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Score => "Accessibility Score",
            Metric::Duration => "Duration",
            Metric::Distance => "Distance",
        }
    }

    pub fn preference(self) -> Preference {
        match self {
            Metric::Score => Preference::HigherIsBetter,
            Metric::Duration | Metric::Distance => Preference::LowerIsBetter,
        }
    }

    fn display(self, route: &Route) -> String {
        match self {
            Metric::Score => route.score.to_string(),
            Metric::Duration => route.duration.clone(),
            Metric::Distance => route.distance.clone(),
        }
    }

    fn value(self, route: &Route) -> Option<f64> {
        match self {
            Metric::Score => Some(f64::from(route.score.value())),
            Metric::Duration => route.duration_value(),
            Metric::Distance => route.distance_value(),
        }
    }
}

/// One metric across the compared routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: Metric,
    pub values: Vec<String>,
    pub best: Option<usize>,
}

/// Presence of one feature across the compared routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub feature: String,
    pub present: Vec<bool>,
}

/// A computed side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub route_ids: Vec<RouteId>,
    pub metrics: Vec<MetricRow>,
    pub features: Vec<FeatureRow>,
}

impl Comparison {
    /// Compare routes in the given order.
    pub fn build(routes: &[&Route]) -> Self {
        let metrics = [Metric::Score, Metric::Duration, Metric::Distance]
            .into_iter()
            .map(|metric| {
                let values: Vec<Option<f64>> = routes.iter().map(|r| metric.value(r)).collect();
                MetricRow {
                    metric,
                    values: routes.iter().map(|r| metric.display(r)).collect(),
                    best: best_index(&values, metric.preference()),
                }
            })
            .collect();

        let mut distinct: Vec<&str> = Vec::new();
        for route in routes {
            for feature in &route.features {
                if !distinct.contains(&feature.as_str()) {
                    distinct.push(feature);
                }
            }
        }

        let features = distinct
            .into_iter()
            .map(|feature| FeatureRow {
                feature: feature.to_string(),
                present: routes.iter().map(|r| r.has_feature(feature)).collect(),
            })
            .collect();

        Self {
            route_ids: routes.iter().map(|r| r.id).collect(),
            metrics,
            features,
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricRow> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}
