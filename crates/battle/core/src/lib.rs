//! Deterministic battle rules shared by the runtime and tooling.
//!
//! `battle-core` owns the combatant model, the typed tag rules parsed from
//! definition data, effective stat resolution, target resolution and the math
//! of applying one action to one target. It performs no I/O and no logging;
//! sequencing, presentation and turn flow live in `battle-runtime`.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod rules;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionError, ActionResult, Confirmation, Ineligible, Selection, StrikeCheck,
    confirm_targets, resolve_targets,
};
pub use config::{BattleConfig, ParamFloors};
pub use env::{
    BattleEnv, BattlerOracle, DatabaseSnapshot, Env, ItemOracle, OracleError, PcgRng, RngOracle,
    Scope, SkillData, SkillOracle, StateData, StateOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use rules::{AttackTypes, ComboRule, LinkRule, RuleError, StrikeDirective, Tags};
pub use state::{
    ActorId, AnimationId, BattleState, ClassId, Combatant, CombatantId, CombatantKind, EnemyId,
    ItemId, Scratch, Side, SkillId, StateError, StateId,
};
pub use stats::{ParamId, StatKey, StatResolver, XParamId};
