//! Fixed icon registry for the presentation layer.
//!
//! The domain only records *what* something is (a transport mode, a
//! requirement symbol); this module decides how it is drawn.

use crate::domain::{RequirementSymbol, TransportMode};

/// An icon: a glyph plus the text read out by assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    /// CSS class suffix, e.g. `icon-train`.
    pub name: &'static str,
    pub glyph: &'static str,
    pub label: &'static str,
}

pub const fn mode_icon(mode: TransportMode) -> Icon {
    match mode {
        TransportMode::Train => Icon {
            name: "icon-train",
            glyph: "\u{1F686}",
            label: "Train",
        },
        TransportMode::Bus => Icon {
            name: "icon-bus",
            glyph: "\u{1F68C}",
            label: "Bus",
        },
        TransportMode::Walk => Icon {
            name: "icon-walk",
            glyph: "\u{1F6B6}",
            label: "Walk or roll",
        },
    }
}

pub const fn requirement_icon(symbol: RequirementSymbol) -> Icon {
    match symbol {
        RequirementSymbol::Accessibility => Icon {
            name: "icon-accessibility",
            glyph: "\u{267F}",
            label: "Accessibility",
        },
        RequirementSymbol::Eye => Icon {
            name: "icon-eye",
            glyph: "\u{1F441}",
            label: "Vision",
        },
        RequirementSymbol::Ear => Icon {
            name: "icon-ear",
            glyph: "\u{1F442}",
            label: "Hearing",
        },
        RequirementSymbol::Brain => Icon {
            name: "icon-brain",
            glyph: "\u{1F9E0}",
            label: "Cognitive",
        },
    }
}
