//! Built-in catalog data used when no data file is configured.

use crate::domain::{
    AccessScore, Category, Requirement, RequirementId, RequirementSymbol, Route, RouteId,
    TransportMode,
};

/// Requirement ids active in a fresh session.
pub const DEFAULT_ACTIVE_REQUIREMENTS: &[&str] = &["wheelchair"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three sample routes.
pub fn seed_routes() -> Vec<Route> {
    vec![
        Route {
            id: RouteId(1),
            origin: "Central Station".to_string(),
            destination: "Modern Art Museum".to_string(),
            duration: "18 mins".to_string(),
            distance: "1.2 km".to_string(),
            category: Category::PublicTransit,
            modes: vec![TransportMode::Train, TransportMode::Bus],
            score: AccessScore::saturating(98),
            features: strings(&["Step-free access", "Braille signage", "Hearing loops"]),
            tags: strings(&["Wheelchair", "Visual", "Auditory"]),
            status: "Clear".to_string(),
            description: "A fully level route utilizing the new metro line and low-floor buses."
                .to_string(),
        },
        Route {
            id: RouteId(2),
            origin: "Greenwich Park".to_string(),
            destination: "Library Square".to_string(),
            duration: "25 mins".to_string(),
            distance: "1.8 km".to_string(),
            category: Category::WalkingRolling,
            modes: vec![TransportMode::Walk],
            score: AccessScore::saturating(92),
            features: strings(&[
                "Smooth pavement",
                "Tactile paving",
                "Rest areas every 200m",
            ]),
            tags: strings(&["Wheelchair", "Neurodivergent"]),
            status: "Busy".to_string(),
            description: "Avoids steep gradients. Includes several sensory-quiet zones."
                .to_string(),
        },
        Route {
            id: RouteId(3),
            origin: "East Plaza".to_string(),
            destination: "Harbor Point".to_string(),
            duration: "12 mins".to_string(),
            distance: "0.8 km".to_string(),
            category: Category::Shuttle,
            modes: vec![TransportMode::Bus],
            score: AccessScore::saturating(85),
            features: strings(&["Assisted boarding", "Spacious interior"]),
            tags: strings(&["Wheelchair"]),
            status: "10m delay".to_string(),
            description: "Electric shuttle service with ramp deployment at every stop."
                .to_string(),
        },
    ]
}

fn requirement(
    id: &'static str,
    label: &str,
    tag: &str,
    color: &str,
    symbol: RequirementSymbol,
) -> Requirement {
    Requirement {
        id: RequirementId::from_static(id),
        label: label.to_string(),
        tag: tag.to_string(),
        color: color.to_string(),
        symbol,
    }
}

/// The four sample requirements.
pub fn seed_requirements() -> Vec<Requirement> {
    vec![
        requirement(
            "wheelchair",
            "Wheelchair Access",
            "Wheelchair",
            "text-blue-600",
            RequirementSymbol::Accessibility,
        ),
        requirement(
            "visual",
            "Visual Aid",
            "Visual",
            "text-purple-600",
            RequirementSymbol::Eye,
        ),
        requirement(
            "auditory",
            "Hearing Support",
            "Auditory",
            "text-green-600",
            RequirementSymbol::Ear,
        ),
        requirement(
            "neuro",
            "Quiet/Sensory",
            "Neurodivergent",
            "text-orange-600",
            RequirementSymbol::Brain,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_routes_are_complete() {
        let routes = seed_routes();
        assert_eq!(routes.len(), 3);
        let scores: Vec<u8> = routes.iter().map(|r| r.score.value()).collect();
        assert_eq!(scores, vec![98, 92, 85]);
        assert_eq!(routes[0].origin, "Central Station");
    }

    #[test]
    fn seed_requirements_are_complete() {
        let reqs = seed_requirements();
        let ids: Vec<&str> = reqs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["wheelchair", "visual", "auditory", "neuro"]);
        assert_eq!(reqs[3].tag, "Neurodivergent");
    }
}
