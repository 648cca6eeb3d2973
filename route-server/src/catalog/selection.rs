//! Per-session selections over the catalog: the focused route and the set
//! of active requirements.

use serde::Serialize;

use crate::domain::{RequirementId, RouteId};

use super::seed::DEFAULT_ACTIVE_REQUIREMENTS;
use super::store::Catalog;

/// The route currently shown in the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteSelection {
    selected: Option<RouteId>,
}

impl RouteSelection {
    /// Start with the catalog's first route selected.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            selected: catalog.first_route().map(|r| r.id),
        }
    }

    pub fn selected(&self) -> Option<RouteId> {
        self.selected
    }

    /// Select a route by id.
    ///
    /// Ids that do not exist in the catalog leave the selection unchanged.
    /// Returns whether the selection now points at `id`.
    pub fn select(&mut self, catalog: &Catalog, id: RouteId) -> bool {
        if catalog.route(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }
}

/// Requirement ids the user has toggled on, in the order they were enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveRequirements(Vec<RequirementId>);

impl ActiveRequirements {
    pub fn new(ids: Vec<RequirementId>) -> Self {
        let mut active = Self(Vec::with_capacity(ids.len()));
        for id in ids {
            if !active.contains(&id) {
                active.0.push(id);
            }
        }
        active
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Toggle a requirement on or off. Returns whether it is now active.
    pub fn toggle(&mut self, id: RequirementId) -> bool {
        if let Some(pos) = self.0.iter().position(|r| r == &id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Replace the whole set.
    pub fn set(&mut self, ids: Vec<RequirementId>) {
        *self = Self::new(ids);
    }

    pub fn contains(&self, id: &RequirementId) -> bool {
        self.0.contains(id)
    }

    pub fn ids(&self) -> &[RequirementId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The set a fresh session starts with: those of
    /// [`DEFAULT_ACTIVE_REQUIREMENTS`] that `catalog` defines.
    pub fn defaults_for(catalog: &Catalog) -> Self {
        Self::new(
            DEFAULT_ACTIVE_REQUIREMENTS
                .iter()
                .map(|id| RequirementId::from_static(id))
                .filter(|id| catalog.requirement(id).is_some())
                .collect(),
        )
    }
}
