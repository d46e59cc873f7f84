//! Commands and their resolution against targets.
//!
//! An [`Action`] is created when a combatant commits a command, mutated while
//! targets are chosen or re-chosen, and discarded once fully resolved.
mod error;
mod execute;
mod result;
pub mod strike;
pub mod targeting;

use arrayvec::ArrayVec;

pub use error::ActionError;
pub use execute::{apply, can_pay, pay_cost, remove_states_by_damage};
pub use result::ActionResult;
pub use strike::{Ineligible, StrikeCheck};
pub use targeting::{Confirmation, Selection, confirm_targets, resolve_targets};

use crate::config::BattleConfig;
use crate::state::{CombatantId, SkillId};

pub type TargetList = ArrayVec<CombatantId, { BattleConfig::MAX_MULTI_TARGETS }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub subject: CombatantId,
    pub skill: SkillId,
    /// Position within the target side for single-target scopes.
    /// `None` lets resolution pick the first valid member.
    pub target_index: Option<usize>,
    /// Hand-picked targets of a multi-select skill, in pick order.
    pub targets: TargetList,
}

impl Action {
    pub fn new(subject: CombatantId, skill: SkillId) -> Self {
        Self {
            subject,
            skill,
            target_index: None,
            targets: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn with_target_index(mut self, index: usize) -> Self {
        self.target_index = Some(index);
        self
    }

    /// An action aimed at one specific combatant, bypassing scope resolution.
    pub fn aimed_at(subject: CombatantId, skill: SkillId, target: CombatantId) -> Self {
        let mut action = Self::new(subject, skill);
        action.targets.push(target);
        action
    }

    pub fn is_multi_select(&self) -> bool {
        !self.targets.is_empty()
    }
}
