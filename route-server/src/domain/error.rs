//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from I/O and persistence errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Accessibility score above 100
    #[error("accessibility score {0} is out of range (0-100)")]
    ScoreOutOfRange(u8),

    /// Requirement identifier with disallowed characters
    #[error("invalid requirement id {id:?}: {reason}")]
    InvalidRequirementId { id: String, reason: &'static str },

    /// Settings value that names no known option
    #[error("unknown {setting}: {value:?}")]
    UnknownSetting { setting: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::ScoreOutOfRange(120);
        assert_eq!(
            err.to_string(),
            "accessibility score 120 is out of range (0-100)"
        );

        let err = DomainError::InvalidRequirementId {
            id: "A B".into(),
            reason: "must not contain spaces",
        };
        assert_eq!(
            err.to_string(),
            "invalid requirement id \"A B\": must not contain spaces"
        );

        let err = DomainError::UnknownSetting {
            setting: "font size",
            value: "xl".into(),
        };
        assert_eq!(err.to_string(), "unknown font size: \"xl\"");
    }
}
