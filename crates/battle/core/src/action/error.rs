//! Action resolution errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),

    /// The subject has no command to execute.
    #[error("combatant {0} has no action")]
    NoAction(CombatantId),

    /// A target was picked after the skill's maximum was reached.
    #[error("target list already holds {max} targets")]
    SelectionFull { max: usize },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Oracle(e) => e.severity(),
            ActionError::State(e) => e.severity(),
            ActionError::NoAction(_) => ErrorSeverity::Internal,
            ActionError::SelectionFull { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Oracle(e) => e.error_code(),
            ActionError::State(e) => e.error_code(),
            ActionError::NoAction(_) => "ACTION_NO_ACTION",
            ActionError::SelectionFull { .. } => "ACTION_SELECTION_FULL",
        }
    }
}
