//! Errors surfaced by the battle runtime.
use battle_core::{
    ActionError, CombatantId, ErrorSeverity, GameError, OracleError, RuleError, Side, SkillId, StateError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("{subject} has no action to execute")]
    NoPendingAction { subject: CombatantId },

    #[error("no target selection is in progress")]
    NotSelecting,

    #[error("no {side} member at index {index}")]
    NoMemberAt { side: Side, index: usize },

    #[error("{skill} cannot target {target}")]
    InvalidTarget { skill: SkillId, target: CombatantId },

    #[error("interceptor '{name}' failed")]
    Interceptor {
        name: &'static str,
        #[source]
        source: Box<RuntimeError>,
    },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
            Self::State(e) => e.severity(),
            Self::Rule(e) => e.severity(),
            Self::NotSelecting | Self::NoPendingAction { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidTarget { .. } | Self::NoMemberAt { .. } => ErrorSeverity::Validation,
            Self::Interceptor { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::State(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::NoPendingAction { .. } => "RUNTIME_NO_PENDING_ACTION",
            Self::NotSelecting => "RUNTIME_NOT_SELECTING",
            Self::NoMemberAt { .. } => "RUNTIME_NO_MEMBER_AT",
            Self::InvalidTarget { .. } => "RUNTIME_INVALID_TARGET",
            Self::Interceptor { .. } => "RUNTIME_INTERCEPTOR_FAILED",
        }
    }
}
