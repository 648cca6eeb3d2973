//! Route filtering by free-text query and accessibility requirements.

use crate::catalog::Catalog;
use crate::domain::{RequirementId, Route};

/// A compiled route filter.
///
/// A route matches when the query appears (case-insensitively) in its
/// origin, destination or category, **and** it carries the tag of every
/// active requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFilter {
    /// Lowercased query; `None` when the query is blank.
    query: Option<String>,
    /// One entry per active requirement. `None` marks a requirement the
    /// catalog does not know, which no route can satisfy.
    required_tags: Vec<Option<String>>,
}

impl RouteFilter {
    /// Build a filter, resolving requirement ids to route tags via the catalog.
    pub fn new(query: &str, active: &[RequirementId], catalog: &Catalog) -> Self {
        let required_tags = active
            .iter()
            .map(|id| catalog.tag_for(id).map(str::to_string))
            .collect();
        Self::from_tags(query, required_tags)
    }

    /// Build a filter from already-resolved tags.
    pub fn from_tags(query: &str, required_tags: Vec<Option<String>>) -> Self {
        let query = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self {
            query,
            required_tags,
        }
    }

    /// A filter that lets everything through.
    pub fn pass_all() -> Self {
        Self::from_tags("", Vec::new())
    }

    fn matches_query(&self, route: &Route) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        route.origin.to_lowercase().contains(query)
            || route.destination.to_lowercase().contains(query)
            || route.category.as_str().to_lowercase().contains(query)
    }

    fn matches_requirements(&self, route: &Route) -> bool {
        self.required_tags
            .iter()
            .all(|tag| tag.as_deref().is_some_and(|t| route.has_tag(t)))
    }

    /// Whether a single route passes both filters.
    pub fn matches(&self, route: &Route) -> bool {
        self.matches_query(route) && self.matches_requirements(route)
    }

    /// Apply the filter, keeping the input order.
    pub fn apply<'a>(&self, routes: impl IntoIterator<Item = &'a Route>) -> Vec<&'a Route> {
        routes.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Filter `routes` by query and active requirements.
pub fn filter_routes<'a>(
    routes: &'a [Route],
    query: &str,
    active: &[RequirementId],
    catalog: &Catalog,
) -> Vec<&'a Route> {
    RouteFilter::new(query, active, catalog).apply(routes)
}

/// Match on origin or destination only, ignoring requirements.
///
/// This is what the `/api/search` endpoint does; the in-app filter also
/// looks at the category and applies requirements.
pub fn search_endpoints<'a>(routes: &'a [Route], query: &str) -> Vec<&'a Route> {
    if query.is_empty() {
        return routes.iter().collect();
    }
    let query = query.to_lowercase();
    routes
        .iter()
        .filter(|r| {
            r.origin.to_lowercase().contains(&query)
                || r.destination.to_lowercase().contains(&query)
        })
        .collect()
}
