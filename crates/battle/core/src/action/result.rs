use crate::state::{CombatantId, StateId};

/// Outcome of applying an action to one target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub target: Option<CombatantId>,
    pub missed: bool,
    pub evaded: bool,
    pub critical: bool,
    /// Positive values are damage, negative values are recovery.
    pub hp_damage: Option<i32>,
    pub mp_damage: Option<i32>,
    pub added_states: Vec<StateId>,
    pub removed_states: Vec<StateId>,
    /// The hit took the target from alive to dead.
    pub knocked_out: bool,
}

impl ActionResult {
    pub fn for_target(target: CombatantId) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn is_hit(&self) -> bool {
        !self.missed && !self.evaded
    }

    /// True when the action had no visible effect at all.
    pub fn is_no_effect(&self) -> bool {
        self.is_hit()
            && self.hp_damage.is_none()
            && self.mp_damage.is_none()
            && self.added_states.is_empty()
            && self.removed_states.is_empty()
    }
}
