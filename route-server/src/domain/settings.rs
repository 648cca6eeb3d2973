//! Display accessibility settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Base text size for the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[default]
    Base,
    Large,
    Huge,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Base, FontSize::Large, FontSize::Huge];

    /// Name used in forms and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Base => "base",
            FontSize::Large => "large",
            FontSize::Huge => "huge",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FontSize::Base => "Standard",
            FontSize::Large => "Large",
            FontSize::Huge => "Huge",
        }
    }
}

impl FromStr for FontSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(FontSize::Base),
            "large" => Ok(FontSize::Large),
            "huge" => Ok(FontSize::Huge),
            _ => Err(DomainError::UnknownSetting {
                setting: "font size",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour contrast mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMode {
    #[default]
    Normal,
    High,
}

impl ContrastMode {
    pub const ALL: [ContrastMode; 2] = [ContrastMode::Normal, ContrastMode::High];

    pub fn as_str(self) -> &'static str {
        match self {
            ContrastMode::Normal => "normal",
            ContrastMode::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContrastMode::Normal => "Normal",
            ContrastMode::High => "High Contrast",
        }
    }
}

impl FromStr for ContrastMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(ContrastMode::Normal),
            "high" => Ok(ContrastMode::High),
            _ => Err(DomainError::UnknownSetting {
                setting: "contrast mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContrastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-session display settings. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub contrast_mode: ContrastMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = AccessibilitySettings::default();
        assert_eq!(settings.font_size, FontSize::Base);
        assert_eq!(settings.contrast_mode, ContrastMode::Normal);
    }

    #[test]
    fn font_size_parse_and_display_agree() {
        for size in FontSize::ALL {
            assert_eq!(size.as_str().parse::<FontSize>().unwrap(), size);
        }
        assert!("xl".parse::<FontSize>().is_err());
    }

    #[test]
    fn contrast_parse() {
        assert_eq!("high".parse::<ContrastMode>().unwrap(), ContrastMode::High);
        assert!("HIGH".parse::<ContrastMode>().is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(FontSize::Base.label(), "Standard");
        assert_eq!(FontSize::Huge.label(), "Huge");
    }

    #[test]
    fn serialized_field_names() {
        let value = serde_json::to_value(AccessibilitySettings::default()).unwrap();
        assert_eq!(value["fontSize"], "base");
        assert_eq!(value["contrastMode"], "normal");
    }
}
