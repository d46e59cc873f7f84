//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, ClassId, EnemyId, SkillId, StateId};

/// Required data is missing from the environment.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SkillOracle not available")]
    SkillsNotAvailable,

    #[error("StateOracle not available")]
    StatesNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("BattlerOracle not available")]
    BattlersNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("skill {0} not found")]
    SkillNotFound(SkillId),

    #[error("state {0} not found")]
    StateNotFound(StateId),

    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("class {0} not found")]
    ClassNotFound(ClassId),

    #[error("enemy {0} not found")]
    EnemyNotFound(EnemyId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            SkillsNotAvailable | StatesNotAvailable | ItemsNotAvailable | BattlersNotAvailable
            | RngNotAvailable => ErrorSeverity::Fatal,

            SkillNotFound(_) | StateNotFound(_) | ActorNotFound(_) | ClassNotFound(_)
            | EnemyNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            StatesNotAvailable => "ORACLE_STATES_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            BattlersNotAvailable => "ORACLE_BATTLERS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            StateNotFound(_) => "ORACLE_STATE_NOT_FOUND",
            ActorNotFound(_) => "ORACLE_ACTOR_NOT_FOUND",
            ClassNotFound(_) => "ORACLE_CLASS_NOT_FOUND",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
        }
    }
}
