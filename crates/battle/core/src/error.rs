//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`OracleError`, `RuleError`, `ActionError`) live next
//! to the code that produces them and all implement [`GameError`].
//!
//! Most combat rules in this crate never fail: a missing directive, an
//! unaffordable counter skill or an empty re-target pool all degrade to "the
//! special rule did not apply". Errors are reserved for broken wiring (missing
//! oracles, unknown combatants) and malformed data rejected at load time.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying with another action may succeed.
    ///
    /// Examples: subject cannot act, not enough MP.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown combatant, malformed tag.
    Validation,

    /// Unexpected inconsistency that indicates a bug.
    Internal,

    /// Unrecoverable: the battle cannot continue.
    ///
    /// Examples: a required oracle was never provided.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings used by logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
