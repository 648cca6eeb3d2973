//! Askama templates for the web frontend.

use askama::Template;

use crate::catalog::{ActiveRequirements, Catalog};
use crate::domain::{AccessibilitySettings, ContrastMode, FontSize, Requirement, Route, RouteId};
use crate::finder::{Comparison, ComparisonSelector, SortField, SortState};
use crate::search::{Autocomplete, Debouncer};

use super::icons::{Icon, mode_icon, requirement_icon};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: search sidebar, requirement grid, route list, route details.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageChrome,
    pub search: SearchView,
    pub history: Vec<String>,
    pub requirements: Vec<RequirementView>,
    pub sort: SortView,
    pub routes: Vec<RouteView>,
    pub selected: Option<RouteView>,
    pub comparison_count: usize,
    pub comparison_limit: usize,
    pub can_compare: bool,
}

/// Side-by-side comparison page.
#[derive(Template)]
#[template(path = "compare.html")]
pub struct CompareTemplate {
    pub page: PageChrome,
    pub columns: Vec<RouteView>,
    pub metrics: Vec<MetricRowView>,
    pub features: Vec<FeatureRowView>,
    pub can_compare: bool,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageChrome,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub page: PageChrome,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A choice in a settings or sort control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Page-wide display settings shared by every page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub font_class: &'static str,
    pub high_contrast: bool,
    pub font_options: Vec<OptionView>,
    pub contrast_options: Vec<OptionView>,
}

impl PageChrome {
    pub fn from_settings(settings: &AccessibilitySettings) -> Self {
        let font_options = FontSize::ALL
            .into_iter()
            .map(|size| OptionView {
                value: size.as_str(),
                label: size.label(),
                selected: size == settings.font_size,
            })
            .collect();
        let contrast_options = ContrastMode::ALL
            .into_iter()
            .map(|mode| OptionView {
                value: mode.as_str(),
                label: mode.label(),
                selected: mode == settings.contrast_mode,
            })
            .collect();

        Self {
            font_class: font_class(settings.font_size),
            high_contrast: settings.contrast_mode == ContrastMode::High,
            font_options,
            contrast_options,
        }
    }
}

impl Default for PageChrome {
    fn default() -> Self {
        Self::from_settings(&AccessibilitySettings::default())
    }
}

fn font_class(size: FontSize) -> &'static str {
    match size {
        FontSize::Base => "text-base",
        FontSize::Large => "text-lg",
        FontSize::Huge => "text-xl",
    }
}

/// Search box with its suggestion list.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub text: String,
    pub query: String,
    pub open: bool,
    pub suggestions: Vec<SuggestionView>,
    /// Quiet period after which typed text applies, for the live script.
    pub debounce_ms: u128,
}

#[derive(Debug, Clone)]
pub struct SuggestionView {
    pub value: String,
    pub highlighted: bool,
}

impl SearchView {
    /// The box shows pending text if any; filtering uses the committed query.
    pub fn new(autocomplete: &Autocomplete, search: &Debouncer) -> Self {
        let suggestions = autocomplete
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, value)| SuggestionView {
                value: value.clone(),
                highlighted: autocomplete.highlighted() == Some(i),
            })
            .collect();

        Self {
            text: search.display_text().to_string(),
            query: search.committed().to_string(),
            open: autocomplete.is_open(),
            suggestions,
            debounce_ms: search.quiet_period().as_millis(),
        }
    }

    /// Id of the highlighted option, for `aria-activedescendant`.
    pub fn active_descendant(&self) -> Option<String> {
        self.suggestions
            .iter()
            .position(|s| s.highlighted)
            .map(|i| format!("suggestion-{i}"))
    }
}

/// A requirement toggle.
#[derive(Debug, Clone)]
pub struct RequirementView {
    pub id: String,
    pub label: String,
    pub color: String,
    pub icon: Icon,
    pub active: bool,
}

impl RequirementView {
    pub fn from_requirement(requirement: &Requirement, active: &ActiveRequirements) -> Self {
        Self {
            id: requirement.id.to_string(),
            label: requirement.label.clone(),
            color: requirement.color.clone(),
            icon: requirement_icon(requirement.symbol),
            active: active.contains(&requirement.id),
        }
    }

    pub fn all(catalog: &Catalog, active: &ActiveRequirements) -> Vec<Self> {
        catalog
            .requirements()
            .iter()
            .map(|r| Self::from_requirement(r, active))
            .collect()
    }
}

/// Sort controls.
#[derive(Debug, Clone)]
pub struct SortView {
    pub fields: Vec<OptionView>,
    pub direction: &'static str,
    pub direction_label: &'static str,
}

impl SortView {
    pub fn from_state(sort: &SortState) -> Self {
        let fields = SortField::ALL
            .into_iter()
            .map(|field| OptionView {
                value: field.as_str(),
                label: field.label(),
                selected: field == sort.field,
            })
            .collect();

        Self {
            fields,
            direction: sort.direction.as_str(),
            direction_label: sort.direction.label(),
        }
    }
}

/// A route card, or the details panel for the selected route.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: u32,
    pub origin: String,
    pub destination: String,
    pub duration: String,
    pub distance: String,
    pub category: String,
    pub score: String,
    pub modes: Vec<Icon>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub is_clear: bool,
    pub description: String,
    pub selected: bool,
    pub compared: bool,
    /// The comparison is full and this route is not in it.
    pub compare_disabled: bool,
}

impl RouteView {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.0,
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            duration: route.duration.clone(),
            distance: route.distance.clone(),
            category: route.category.to_string(),
            score: route.score.to_string(),
            modes: route.modes.iter().map(|&m| mode_icon(m)).collect(),
            features: route.features.clone(),
            tags: route.tags.clone(),
            status: route.status.clone(),
            is_clear: route.is_clear(),
            description: route.description.clone(),
            selected: false,
            compared: false,
            compare_disabled: false,
        }
    }

    /// Mark selection and comparison state for a card in the list.
    pub fn with_session(mut self, selected: bool, comparison: &ComparisonSelector) -> Self {
        self.selected = selected;
        self.compared = comparison.is_selected(RouteId(self.id));
        self.compare_disabled = !self.compared && comparison.is_at_limit();
        self
    }

    pub fn title(&self) -> String {
        format!("{} to {}", self.origin, self.destination)
    }
}

/// One metric row of the comparison table.
#[derive(Debug, Clone)]
pub struct MetricRowView {
    pub label: &'static str,
    pub cells: Vec<MetricCellView>,
}

#[derive(Debug, Clone)]
pub struct MetricCellView {
    pub value: String,
    pub best: bool,
}

/// One feature row of the comparison table.
#[derive(Debug, Clone)]
pub struct FeatureRowView {
    pub feature: String,
    pub cells: Vec<FeatureCellView>,
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureCellView {
    pub present: bool,
}

impl CompareTemplate {
    pub fn new(page: PageChrome, routes: &[&Route]) -> Self {
        let comparison = Comparison::build(routes);

        let metrics = comparison
            .metrics
            .iter()
            .map(|row| MetricRowView {
                label: row.metric.label(),
                cells: row
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| MetricCellView {
                        value: value.clone(),
                        best: row.best == Some(i),
                    })
                    .collect(),
            })
            .collect();

        let features = comparison
            .features
            .into_iter()
            .map(|row| FeatureRowView {
                feature: row.feature,
                cells: row
                    .present
                    .into_iter()
                    .map(|present| FeatureCellView { present })
                    .collect(),
            })
            .collect();

        Self {
            page,
            columns: routes.iter().map(|r| RouteView::from_route(r)).collect(),
            metrics,
            features,
            can_compare: routes.len() >= 2,
        }
    }
}
