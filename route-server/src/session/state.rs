//! Everything one browser session remembers between requests.

use std::time::Instant;

use crate::catalog::{ActiveRequirements, Catalog, RouteSelection};
use crate::config::AppConfig;
use crate::domain::{AccessibilitySettings, RequirementId, Route, RouteId};
use crate::finder::{ComparisonSelector, SortState, ToggleOutcome, browse};
use crate::search::{Autocomplete, Debouncer, Key};

/// Per-session state.
///
/// Nothing here is persisted; the search history is shared and lives in
/// [`crate::search::PersistentHistory`] instead.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub selection: RouteSelection,
    pub requirements: ActiveRequirements,
    pub settings: AccessibilitySettings,
    pub sort: SortState,
    pub comparison: ComparisonSelector,
    pub autocomplete: Autocomplete,
    pub search: Debouncer,
}

impl SessionState {
    /// Fresh state: first route selected, default requirements active,
    /// default display settings and sort, nothing typed.
    pub fn new(catalog: &Catalog, config: &AppConfig) -> Self {
        Self {
            selection: RouteSelection::new(catalog),
            requirements: ActiveRequirements::defaults_for(catalog),
            settings: AccessibilitySettings::default(),
            sort: SortState::default(),
            comparison: ComparisonSelector::new(),
            autocomplete: Autocomplete::from_routes(
                catalog.routes(),
                config.autocomplete_min_chars,
            ),
            search: Debouncer::new(config.debounce),
        }
    }

    /// A keystroke in the search box.
    pub fn type_input(&mut self, text: &str, now: Instant) {
        self.search.input(text, now);
        self.autocomplete.set_input(text);
    }

    /// Submit the search box: the text applies immediately and the
    /// suggestion list closes.
    pub fn submit(&mut self, text: &str) {
        self.search.commit_now(text);
        self.autocomplete.set_input(text);
        self.autocomplete.close();
    }

    /// A navigation key in the search box. Returns the suggestion committed
    /// by Enter, if any.
    pub fn press_key(&mut self, key: Key) -> Option<String> {
        let chosen = self.autocomplete.handle_key(key)?;
        self.search.commit_now(&chosen);
        Some(chosen)
    }

    /// A suggestion picked from the list.
    pub fn choose_suggestion(&mut self, value: &str) {
        self.autocomplete.select(value);
        self.search.commit_now(value);
    }

    pub fn toggle_requirement(&mut self, id: RequirementId) -> bool {
        self.requirements.toggle(id)
    }

    pub fn select_route(&mut self, catalog: &Catalog, id: RouteId) -> bool {
        self.selection.select(catalog, id)
    }

    pub fn toggle_comparison(&mut self, id: RouteId) -> ToggleOutcome {
        self.comparison.toggle(id)
    }

    /// The query filtering uses right now, after applying any input whose
    /// quiet period has passed.
    pub fn query(&mut self, now: Instant) -> &str {
        self.search.settle(now);
        self.search.committed()
    }

    /// Routes shown in the list: filtered by query and requirements, then
    /// sorted.
    pub fn visible_routes<'a>(&mut self, catalog: &'a Catalog, now: Instant) -> Vec<&'a Route> {
        self.search.settle(now);
        browse(
            catalog,
            self.search.committed(),
            self.requirements.ids(),
            &self.sort,
        )
    }

    pub fn selected_route<'a>(&self, catalog: &'a Catalog) -> Option<&'a Route> {
        catalog.route(self.selection.selected()?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::FontSize;
    use crate::finder::SortField;

    fn new_state() -> (Catalog, SessionState) {
        let catalog = Catalog::seed();
        let state = SessionState::new(&catalog, &AppConfig::default());
        (catalog, state)
    }

    #[test]
    fn fresh_session_defaults() {
        let (catalog, mut state) = new_state();

        assert_eq!(state.selection.selected(), Some(RouteId(1)));
        assert_eq!(state.requirements.ids(), &[RequirementId::parse("wheelchair").unwrap()]);
        assert_eq!(state.settings.font_size, FontSize::Base);
        assert_eq!(state.sort, SortState::default());
        assert!(state.comparison.is_empty());
        assert!(!state.autocomplete.is_open());
        assert_eq!(state.query(Instant::now()), "");
        assert_eq!(state.selected_route(&catalog).map(|r| r.id), Some(RouteId(1)));
    }

    #[test]
    fn typed_input_waits_for_quiet_period() {
        let (catalog, mut state) = new_state();
        let start = Instant::now();

        state.type_input("Harbor", start);
        assert!(state.autocomplete.is_open());
        assert_eq!(state.query(start + Duration::from_millis(100)), "");
        assert_eq!(state.visible_routes(&catalog, start).len(), 3);

        let later = start + Duration::from_millis(300);
        let visible = state.visible_routes(&catalog, later);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].destination, "Harbor Point");
    }

    #[test]
    fn submit_applies_immediately_and_closes_list() {
        let (_, mut state) = new_state();
        let now = Instant::now();

        state.type_input("Central", now);
        state.submit("Central");

        assert!(!state.autocomplete.is_open());
        assert_eq!(state.query(now), "Central");
    }

    #[test]
    fn enter_on_highlight_commits_suggestion() {
        let (_, mut state) = new_state();
        let now = Instant::now();

        state.type_input("Central", now);
        assert_eq!(state.press_key(Key::ArrowDown), None);
        let chosen = state.press_key(Key::Enter);

        assert_eq!(chosen.as_deref(), Some("Central Station"));
        assert_eq!(state.query(now), "Central Station");
        assert_eq!(state.autocomplete.input(), "Central Station");
        assert!(!state.autocomplete.is_open());
    }

    #[test]
    fn enter_without_highlight_does_nothing() {
        let (_, mut state) = new_state();
        let now = Instant::now();

        state.type_input("Central", now);
        assert_eq!(state.press_key(Key::Enter), None);
        assert_eq!(state.search.committed(), "");
    }

    #[test]
    fn choosing_suggestion_commits_it() {
        let (_, mut state) = new_state();
        state.choose_suggestion("Library Square");
        assert_eq!(state.query(Instant::now()), "Library Square");
    }

    #[test]
    fn requirement_toggle_changes_visible_routes() {
        let (catalog, mut state) = new_state();
        let now = Instant::now();
        assert_eq!(state.visible_routes(&catalog, now).len(), 3);

        state.toggle_requirement(RequirementId::parse("visual").unwrap());
        let visible = state.visible_routes(&catalog, now);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, RouteId(1));
    }

    #[test]
    fn sort_applies_to_visible_routes() {
        let (catalog, mut state) = new_state();
        state.requirements.set(vec![]);
        state.sort.set_field(SortField::Duration);

        let ids: Vec<_> = state
            .visible_routes(&catalog, Instant::now())
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![RouteId(3), RouteId(1), RouteId(2)]);
    }

    #[test]
    fn unknown_route_selection_is_ignored() {
        let (catalog, mut state) = new_state();
        assert!(!state.select_route(&catalog, RouteId(99)));
        assert!(state.select_route(&catalog, RouteId(2)));
        assert_eq!(state.selected_route(&catalog).map(|r| r.id), Some(RouteId(2)));
    }
}
