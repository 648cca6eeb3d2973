//! In-memory route and requirement collections.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{Requirement, RequirementId, Route, RouteId};

use super::error::CatalogError;
use super::seed::{seed_requirements, seed_routes};

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    routes: Vec<Route>,
    #[serde(default)]
    requirements: Option<Vec<Requirement>>,
}

/// The fixed set of routes and requirements for the lifetime of the server.
///
/// Built once at startup and shared read-only between sessions.
#[derive(Debug, Clone)]
pub struct Catalog {
    routes: Vec<Route>,
    requirements: Vec<Requirement>,
}

impl Catalog {
    /// Build a catalog, validating that identifiers are unique.
    pub fn new(routes: Vec<Route>, requirements: Vec<Requirement>) -> Result<Self, CatalogError> {
        if routes.is_empty() {
            return Err(CatalogError::NoRoutes);
        }

        let mut route_ids = HashSet::new();
        for route in &routes {
            if !route_ids.insert(route.id) {
                return Err(CatalogError::DuplicateRoute(route.id));
            }
        }

        let mut requirement_ids = HashSet::new();
        for req in &requirements {
            if !requirement_ids.insert(&req.id) {
                return Err(CatalogError::DuplicateRequirement(req.id.clone()));
            }
        }

        Ok(Self {
            routes,
            requirements,
        })
    }

    /// The built-in sample catalog.
    pub fn seed() -> Self {
        Self {
            routes: seed_routes(),
            requirements: seed_requirements(),
        }
    }

    /// Load a catalog from a JSON file.
    ///
    /// The file holds a `routes` array and an optional `requirements` array;
    /// when requirements are omitted the built-in set is used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile =
            serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let requirements = file.requirements.unwrap_or_else(seed_requirements);
        let catalog = Self::new(file.routes, requirements)?;

        info!(
            path = %path.display(),
            routes = catalog.routes.len(),
            requirements = catalog.requirements.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Look up a route by id.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Look up a requirement by id.
    pub fn requirement(&self, id: &RequirementId) -> Option<&Requirement> {
        self.requirements.iter().find(|r| &r.id == id)
    }

    /// The route tag that satisfies a requirement, if the requirement exists.
    pub fn tag_for(&self, id: &RequirementId) -> Option<&str> {
        self.requirement(id).map(|r| r.tag.as_str())
    }

    /// The first route, selected by default in new sessions.
    pub fn first_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::route;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn seed_catalog_lookups() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.routes().len(), 3);
        assert_eq!(catalog.route(RouteId(2)).unwrap().origin, "Greenwich Park");
        assert!(catalog.route(RouteId(99)).is_none());

        let neuro = RequirementId::parse("neuro").unwrap();
        assert_eq!(catalog.tag_for(&neuro), Some("Neurodivergent"));

        let unknown = RequirementId::parse("tactile").unwrap();
        assert_eq!(catalog.tag_for(&unknown), None);
    }

    #[test]
    fn first_route_is_default_selection() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.first_route().map(|r| r.id), Some(RouteId(1)));
    }

    #[test]
    fn rejects_duplicate_route_ids() {
        let routes = vec![route(1, "A", "B", &[]), route(1, "C", "D", &[])];
        let err = Catalog::new(routes, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRoute(RouteId(1))));
    }

    #[test]
    fn rejects_duplicate_requirement_ids() {
        let mut reqs = seed_requirements();
        reqs.push(reqs[0].clone());
        let err = Catalog::new(vec![route(1, "A", "B", &[])], reqs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRequirement(_)));
    }

    #[test]
    fn rejects_empty_route_list() {
        assert!(matches!(
            Catalog::new(vec![], vec![]),
            Err(CatalogError::NoRoutes)
        ));
    }

    #[test]
    fn load_from_file_with_default_requirements() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"routes": [{{
                "id": 10, "origin": "Dock", "destination": "Gallery",
                "duration": "7 mins", "distance": "0.4 km", "type": "Shuttle",
                "modes": ["bus"], "score": 88, "tags": ["Wheelchair"],
                "status": "Clear"
            }}]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.routes().len(), 1);
        assert_eq!(catalog.routes()[0].destination, "Gallery");
        assert_eq!(catalog.requirements().len(), 4);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn load_invalid_json_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
