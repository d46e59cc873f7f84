use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, Side};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("{side} is full ({capacity} members)")]
    SideFull { side: Side, capacity: usize },

    #[error("combatant {0} is not in this battle")]
    UnknownCombatant(CombatantId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::Oracle(e) => e.severity(),
            StateError::SideFull { .. } => ErrorSeverity::Validation,
            StateError::UnknownCombatant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::Oracle(e) => e.error_code(),
            StateError::SideFull { .. } => "STATE_SIDE_FULL",
            StateError::UnknownCombatant(_) => "STATE_UNKNOWN_COMBATANT",
        }
    }
}
