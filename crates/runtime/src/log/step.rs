//! Battle log step definitions.

use battle_core::{Action, ActionResult, AnimationId, CombatantId, SkillId};

/// One queued log entry.
///
/// Presentation steps go to the [`super::Presenter`]; wait steps suspend the
/// stepper; effect steps are handed back to the battle to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogStep {
    // ===== presentation =====
    AddText(String),
    PushBaseLine,
    PopBaseLine,
    Clear,
    PerformActionStart { subject: CombatantId, skill: SkillId },
    PerformAction { subject: CombatantId, skill: SkillId },
    PerformActionEnd { subject: CombatantId },
    ShowAnimation {
        subject: CombatantId,
        targets: Vec<CombatantId>,
        animation: AnimationId,
    },
    DisplayResult { subject: CombatantId, result: ActionResult },
    PerformDamage { target: CombatantId },
    PerformCollapse { target: CombatantId },

    // ===== suspension =====
    WaitForAnimation,
    WaitForMovement,
    WaitForEffect,
    /// Blocks for a fixed number of frames.
    Wait(u32),

    // ===== effects =====
    /// Resumes an action after a first strike, if its subject survived.
    PerformInvocation { action: Action, target: CombatantId },
}

impl LogStep {
    pub fn name(&self) -> &'static str {
        match self {
            LogStep::AddText(_) => "add_text",
            LogStep::PushBaseLine => "push_base_line",
            LogStep::PopBaseLine => "pop_base_line",
            LogStep::Clear => "clear",
            LogStep::PerformActionStart { .. } => "perform_action_start",
            LogStep::PerformAction { .. } => "perform_action",
            LogStep::PerformActionEnd { .. } => "perform_action_end",
            LogStep::ShowAnimation { .. } => "show_animation",
            LogStep::DisplayResult { .. } => "display_result",
            LogStep::PerformDamage { .. } => "perform_damage",
            LogStep::PerformCollapse { .. } => "perform_collapse",
            LogStep::WaitForAnimation => "wait_for_animation",
            LogStep::WaitForMovement => "wait_for_movement",
            LogStep::WaitForEffect => "wait_for_effect",
            LogStep::Wait(_) => "wait",
            LogStep::PerformInvocation { .. } => "perform_invocation",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, LogStep::AddText(_))
    }

    /// Steps the battle, not the presenter, must execute.
    pub fn is_effect(&self) -> bool {
        matches!(self, LogStep::PerformInvocation { .. })
    }
}
