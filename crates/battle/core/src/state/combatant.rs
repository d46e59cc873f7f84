//! A single party member or enemy.

use arrayvec::ArrayVec;

use crate::action::Action;
use crate::config::BattleConfig;
use crate::rules::StrikeDirective;
use crate::state::{ActorId, ClassId, CombatantId, EnemyId, ItemId, Side, StateId, StatusList};

/// Ally or enemy, with the definitions each one is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Ally {
        actor: ActorId,
        class: ClassId,
        equipment: ArrayVec<ItemId, { BattleConfig::MAX_EQUIPMENT }>,
    },
    Enemy {
        enemy: EnemyId,
    },
}

/// Per-action transient fields.
///
/// Written only by action application and the first strike pipeline while
/// this combatant is the current target; wiped by [`Scratch::reset`] at every
/// turn boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scratch {
    /// The attacker whose action is being applied to this combatant.
    pub paired_opponent: Option<CombatantId>,
    /// Directive confirmed by the last eligibility check.
    pub strike_directive: Option<StrikeDirective>,
    /// Counter action built for the pending first strike.
    pub first_strike_action: Option<Action>,
}

impl Scratch {
    pub fn reset(&mut self) {
        *self = Scratch::default();
    }

    pub fn is_clear(&self) -> bool {
        self.paired_opponent.is_none()
            && self.strike_directive.is_none()
            && self.first_strike_action.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub kind: CombatantKind,
    pub level: u32,
    pub hp: i32,
    pub mp: i32,
    pub tp: i32,
    pub states: StatusList,
    /// Command chosen for this turn.
    pub action: Option<Action>,
    pub scratch: Scratch,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, side: Side, kind: CombatantKind) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            kind,
            level: 1,
            hp: 1,
            mp: 0,
            tp: 0,
            states: StatusList::empty(),
            action: None,
            scratch: Scratch::default(),
        }
    }

    pub fn is_ally(&self) -> bool {
        matches!(self.kind, CombatantKind::Ally { .. })
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, CombatantKind::Enemy { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn equipment(&self) -> &[ItemId] {
        match &self.kind {
            CombatantKind::Ally { equipment, .. } => equipment,
            CombatantKind::Enemy { .. } => &[],
        }
    }

    /// Sets HP within `[0, max_hp]`. Reaching zero clears every state.
    pub fn set_hp(&mut self, hp: i32, max_hp: i32) {
        self.hp = hp.clamp(0, max_hp.max(0));
        if self.hp == 0 {
            self.die();
        }
    }

    pub fn set_mp(&mut self, mp: i32, max_mp: i32) {
        self.mp = mp.clamp(0, max_mp.max(0));
    }

    pub fn gain_tp(&mut self, amount: i32) {
        self.tp = (self.tp + amount).clamp(0, BattleConfig::MAX_TP);
    }

    pub fn die(&mut self) {
        self.hp = 0;
        self.states.clear();
        self.action = None;
    }

    pub fn revive(&mut self, hp: i32) {
        if self.is_dead() {
            self.hp = hp.max(1);
        }
    }

    pub fn add_state(&mut self, state: StateId) -> bool {
        self.is_alive() && self.states.add(state)
    }

    pub fn remove_state(&mut self, state: StateId) -> bool {
        self.states.remove(state)
    }

    pub fn has_state(&self, state: StateId) -> bool {
        self.states.contains(state)
    }
}
