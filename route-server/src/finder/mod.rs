//! Route finding: filtering, ordering and comparison.
//!
//! Everything here is a pure function over borrowed routes. The catalog is
//! never mutated; every operation returns a new sequence of references.

mod compare;
mod error;
mod filter;
mod sort;


pub use compare::{
    Comparison, ComparisonSelector, FeatureRow, MAX_COMPARISON_ROUTES, Metric, MetricRow,
    Preference, ToggleOutcome, best_index,
};
pub use error::FinderError;
pub use filter::{RouteFilter, filter_routes, search_endpoints};
pub use sort::{SortDirection, SortField, SortState, sort_routes};

use crate::catalog::Catalog;
use crate::domain::{RequirementId, Route};

/// Filter then sort: the list shown in the sidebar.
pub fn browse<'a>(
    catalog: &'a Catalog,
    query: &str,
    active: &[RequirementId],
    sort: &SortState,
) -> Vec<&'a Route> {
    let filtered = RouteFilter::new(query, active, catalog).apply(catalog.routes());
    sort.apply(filtered)
}
