use serde::{Deserialize, Serialize};

use battle_core::{ActionResult, CombatantId, Side, SkillId, StateId};

/// Milestones within a single action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    Started {
        subject: CombatantId,
        skill: SkillId,
        targets: Vec<CombatantId>,
    },
    /// A multi-target slot was rebound before execution.
    Retargeted {
        subject: CombatantId,
        slot: usize,
        from: CombatantId,
        to: CombatantId,
    },
    Applied {
        subject: CombatantId,
        result: ActionResult,
    },
    FirstStrike {
        defender: CombatantId,
        subject: CombatantId,
        /// Final phase name, `resumed` or `aborted`.
        outcome: String,
    },
    Skipped {
        subject: CombatantId,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Started { turn: u32 },
    Ended { turn: u32 },
    StateAdded { target: CombatantId, state: StateId },
    Victory { side: Side },
}
