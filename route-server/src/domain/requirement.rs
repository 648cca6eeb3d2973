//! Accessibility requirements used to filter routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Identifier of a requirement, e.g. `wheelchair`.
///
/// Identifiers are non-empty lowercase ASCII words (letters, digits, `-`,
/// `_`), so they can be embedded in URLs and form values unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequirementId(String);

impl RequirementId {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::InvalidRequirementId {
                id: s.to_string(),
                reason: "must not be empty",
            });
        }
        let valid = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !valid {
            return Err(DomainError::InvalidRequirementId {
                id: s.to_string(),
                reason: "must be lowercase letters, digits, '-' or '_'",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Build an id from a literal known to be valid.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(Self::parse(s).is_ok(), "invalid static requirement id {s}");
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequirementId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RequirementId> for String {
    fn from(id: RequirementId) -> Self {
        id.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbol shown next to a requirement; mapped to an icon when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementSymbol {
    Accessibility,
    Eye,
    Ear,
    Brain,
}

/// A named accessibility need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub label: String,
    /// Route tag that satisfies this requirement.
    pub tag: String,
    pub color: String,
    pub symbol: RequirementSymbol,
}
