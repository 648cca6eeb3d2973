//! Location autocomplete with keyboard navigation.
//!
//! Candidates are every distinct origin and destination in the catalog.
//! The state machine mirrors a combobox: the list opens while the input
//! has matches, arrow keys move a wrapping highlight, Enter commits the
//! highlighted suggestion and Escape dismisses the list.

use std::str::FromStr;

use serde::Serialize;

use crate::domain::Route;

use super::error::KeyError;

/// Default minimum input length before suggestions appear.
pub const DEFAULT_MIN_CHARS: usize = 1;

/// Keys the suggestion list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl FromStr for Key {
    type Err = KeyError;

    /// Parse a DOM `KeyboardEvent.key` name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowDown" | "Down" => Ok(Key::ArrowDown),
            "ArrowUp" | "Up" => Ok(Key::ArrowUp),
            "Enter" => Ok(Key::Enter),
            "Escape" | "Esc" => Ok(Key::Escape),
            _ => Err(KeyError::Unsupported(s.to_string())),
        }
    }
}

/// Distinct origins and destinations, sorted case-insensitively.
pub fn location_candidates<'a>(routes: impl IntoIterator<Item = &'a Route>) -> Vec<String> {
    let mut locations: Vec<String> = routes
        .into_iter()
        .flat_map(|r| [r.origin.clone(), r.destination.clone()])
        .collect();
    locations.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    locations.dedup();
    locations
}

/// Candidates containing `input` (case-insensitive), or nothing when the
/// input is shorter than `min_chars`.
pub fn suggest(candidates: &[String], input: &str, min_chars: usize) -> Vec<String> {
    if input.chars().count() < min_chars {
        return Vec::new();
    }
    let query = input.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Autocomplete state for one search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Autocomplete {
    #[serde(skip)]
    candidates: Vec<String>,
    #[serde(skip)]
    min_chars: usize,
    input: String,
    suggestions: Vec<String>,
    highlighted: Option<usize>,
    open: bool,
    /// The value most recently picked from the list. While the input still
    /// equals it the list stays closed.
    #[serde(skip)]
    last_selected: Option<String>,
}

impl Autocomplete {
    pub fn new(candidates: Vec<String>, min_chars: usize) -> Self {
        Self {
            candidates,
            min_chars,
            input: String::new(),
            suggestions: Vec::new(),
            highlighted: None,
            open: false,
            last_selected: None,
        }
    }

    /// Build with candidates drawn from route endpoints.
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a Route>, min_chars: usize) -> Self {
        Self::new(location_candidates(routes), min_chars)
    }

    /// Update the text in the search box.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();

        let suggestions = suggest(&self.candidates, text, self.min_chars);
        if suggestions != self.suggestions {
            self.highlighted = None;
            self.suggestions = suggestions;
        }

        let just_selected = self.last_selected.as_deref() == Some(text);
        if self.suggestions.is_empty() {
            self.open = false;
        } else if !just_selected {
            self.open = true;
        }

        if !just_selected {
            self.last_selected = None;
        }
    }

    /// React to a key press.
    ///
    /// Returns the committed suggestion when Enter picks one. Keys are
    /// ignored while the list is closed or empty.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        if !self.open || self.suggestions.is_empty() {
            return None;
        }
        let len = self.suggestions.len();

        match key {
            Key::ArrowDown => {
                self.highlighted = match self.highlighted {
                    Some(i) if i + 1 < len => Some(i + 1),
                    _ => Some(0),
                };
                None
            }
            Key::ArrowUp => {
                self.highlighted = match self.highlighted {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => Some(len - 1),
                };
                None
            }
            Key::Enter => {
                let selected = self.suggestions.get(self.highlighted?)?.clone();
                self.select(&selected);
                Some(selected)
            }
            Key::Escape => {
                self.close();
                None
            }
        }
    }

    /// Commit a suggestion picked with the pointer or keyboard.
    pub fn select(&mut self, value: &str) {
        self.last_selected = Some(value.to_string());
        self.open = false;
        self.highlighted = None;
        self.set_input(value);
    }

    /// Close the list without committing anything.
    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    /// Move the highlight directly, e.g. on hover. Out-of-range indices
    /// clear it.
    pub fn set_highlighted(&mut self, index: Option<usize>) {
        self.highlighted = index.filter(|&i| i < self.suggestions.len());
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}
