//! Tag grammar errors.

use crate::error::{ErrorSeverity, GameError};

/// A free-form tag value that does not match its grammar.
///
/// Raised once at load time. Combat code never sees these: a rule that fails
/// to parse is either rejected with the whole database (strict loading) or
/// dropped and treated as absent (lenient loading).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleError {
    #[error("tag `{tag}` has an empty value")]
    Empty { tag: String },

    #[error("`{0}` is not a valid skill id")]
    InvalidSkillId(String),

    #[error("`{0}` is not a valid state id")]
    InvalidStateId(String),

    #[error("`{0}` is not a known stat")]
    UnknownStat(String),

    #[error("`{0}` is not a valid numeric delta")]
    InvalidDelta(String),

    #[error("`{0}` does not contain a target count")]
    InvalidCount(String),

    #[error("target count {count} exceeds the limit of {max}")]
    CountOutOfRange { count: u32, max: usize },

    #[error("`{value}` does not match `{expected}`")]
    Malformed {
        value: String,
        expected: &'static str,
    },

    #[error("linked stats must name a param, found `{0}`")]
    NotAParam(String),
}

impl GameError for RuleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use RuleError::*;
        match self {
            Empty { .. } => "RULE_EMPTY",
            InvalidSkillId(_) => "RULE_INVALID_SKILL_ID",
            InvalidStateId(_) => "RULE_INVALID_STATE_ID",
            UnknownStat(_) => "RULE_UNKNOWN_STAT",
            InvalidDelta(_) => "RULE_INVALID_DELTA",
            InvalidCount(_) => "RULE_INVALID_COUNT",
            CountOutOfRange { .. } => "RULE_COUNT_OUT_OF_RANGE",
            Malformed { .. } => "RULE_MALFORMED",
            NotAParam(_) => "RULE_NOT_A_PARAM",
        }
    }
}
