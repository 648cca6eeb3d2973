//! Data transfer objects for web requests and responses.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::{AccessibilitySettings, RequirementId, Route, RouteId};
use crate::finder::{SortState, ToggleOutcome};
use crate::search::Autocomplete;
use crate::session::SessionState;

/// Envelope wrapping every JSON API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(message.into()),
        }
    }
}

/// A list of routes and its length.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
    pub count: usize,
}

impl RoutesResponse {
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a Route>) -> Self {
        let routes: Vec<Route> = routes.into_iter().cloned().collect();
        let count = routes.len();
        Self { routes, count }
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,

    /// Accepted for compatibility; the search endpoint matches on
    /// location only.
    #[serde(default)]
    pub active_requirements: Vec<String>,
}

/// Query string of `GET /api/autocomplete`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteRequest {
    #[serde(default)]
    pub q: String,

    /// Overrides the configured minimum input length
    pub min_chars: Option<usize>,
}

/// A form carrying a single text value (search box, history entry).
#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub q: String,
}

/// A key press in the search box, named as in DOM `KeyboardEvent.key`.
#[derive(Debug, Deserialize)]
pub struct KeyForm {
    pub key: String,
}

/// Sort field choice.
#[derive(Debug, Deserialize)]
pub struct SortForm {
    pub field: String,
}

/// Display settings; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub font_size: Option<String>,
    pub contrast: Option<String>,
}

/// JSON view of a session, returned by session endpoints to non-HTML
/// clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub selected_route_id: Option<RouteId>,
    pub active_requirements: Vec<RequirementId>,
    pub settings: AccessibilitySettings,
    pub sort: SortState,
    pub comparison: Vec<RouteId>,
    pub can_compare: bool,
    pub query: String,
    pub pending_query: Option<String>,
    pub autocomplete: Autocomplete,
    /// Ids of the routes currently listed, in display order.
    pub visible_routes: Vec<RouteId>,
    pub history: Vec<String>,

    /// Result of the comparison toggle that produced this snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_outcome: Option<ToggleOutcome>,

    /// Suggestion committed by the key press that produced this snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen: Option<String>,
}

impl SessionSnapshot {
    pub fn capture(
        session: &mut SessionState,
        catalog: &Catalog,
        history: Vec<String>,
        now: Instant,
    ) -> Self {
        let visible_routes = session
            .visible_routes(catalog, now)
            .iter()
            .map(|r| r.id)
            .collect();

        Self {
            selected_route_id: session.selection.selected(),
            active_requirements: session.requirements.ids().to_vec(),
            settings: session.settings,
            sort: session.sort,
            comparison: session.comparison.ids().to_vec(),
            can_compare: session.comparison.can_compare(),
            query: session.search.committed().to_string(),
            pending_query: session.search.pending().map(str::to_string),
            autocomplete: session.autocomplete.clone(),
            visible_routes,
            history,
            comparison_outcome: None,
            chosen: None,
        }
    }

    pub fn with_comparison_outcome(mut self, outcome: ToggleOutcome) -> Self {
        self.comparison_outcome = Some(outcome);
        self
    }

    pub fn with_chosen(mut self, chosen: Option<String>) -> Self {
        self.chosen = chosen;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn success_envelope_omits_error() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let value = serde_json::to_value(ApiResponse::<()>::failure("Failed to fetch routes"))
            .unwrap();
        assert_eq!(value["success"], false);
        assert!(value["data"].is_null());
        assert_eq!(value["error"], "Failed to fetch routes");
    }

    #[test]
    fn search_request_fields_are_optional() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.query, "");
        assert!(req.active_requirements.is_empty());

        let req: SearchRequest =
            serde_json::from_str(r#"{"query":"park","activeRequirements":["visual"]}"#).unwrap();
        assert_eq!(req.query, "park");
        assert_eq!(req.active_requirements, vec!["visual"]);
    }

    #[test]
    fn snapshot_of_fresh_session() {
        let catalog = Catalog::seed();
        let mut session = SessionState::new(&catalog, &AppConfig::default());
        let snapshot = SessionSnapshot::capture(&mut session, &catalog, vec![], Instant::now());

        assert_eq!(snapshot.selected_route_id, Some(RouteId(1)));
        assert_eq!(snapshot.visible_routes, vec![RouteId(1), RouteId(2), RouteId(3)]);
        assert!(!snapshot.can_compare);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["selectedRouteId"], 1);
        assert_eq!(value["activeRequirements"], serde_json::json!(["wheelchair"]));
        assert_eq!(value["sort"]["direction"], "desc");
        assert!(value.get("comparisonOutcome").is_none());
    }
}
