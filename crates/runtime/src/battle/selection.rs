//! Live target selection callbacks.
//!
//! The UI opens a session with [`Battle::begin_selection`], then reports each
//! confirmed pick through [`Battle::on_target_ok`] and a cancel through
//! [`Battle::on_target_cancel`]. Multi-target skills collect picks until
//! their maximum is reached; everything else completes on the first pick.

use battle_core::action::targeting::{fits, target_side};
use battle_core::{Action, CombatantId, Selection, Side, SkillId};
use tracing::debug;

use super::Battle;
use crate::error::{Result, RuntimeError};

/// Numbered marker drawn over a picked target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicator {
    pub target: CombatantId,
    /// 1-based pick order.
    pub ordinal: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionProgress {
    /// More picks are needed.
    Continue { chosen: usize, max: usize },
    /// The command is set on the actor.
    Complete { subject: CombatantId },
}

#[derive(Clone, Debug, Default)]
pub(super) struct SelectionState {
    pending: Option<Action>,
    indicators: Vec<Indicator>,
}

impl Battle<'_> {
    /// Starts picking targets for `subject` using `skill`.
    ///
    /// Any earlier unfinished session is discarded.
    pub fn begin_selection(&mut self, subject: CombatantId, skill: SkillId) -> Result<()> {
        self.state.get(subject)?;
        self.env.skill(skill)?;
        self.selection.pending = Some(Action::new(subject, skill));
        self.selection.indicators.clear();
        Ok(())
    }

    /// The action under construction, if a session is open.
    pub fn pending_selection(&self) -> Option<&Action> {
        self.selection.pending.as_ref()
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.selection.indicators
    }

    /// Confirms the member at `index` on `side` as the next target.
    pub fn on_target_ok(&mut self, side: Side, index: usize) -> Result<SelectionProgress> {
        let action = self.selection.pending.as_mut().ok_or(RuntimeError::NotSelecting)?;
        let skill = self.env.skill(action.skill)?;
        let subject_side = self.state.get(action.subject)?.side;
        let target = self
            .state
            .member_at(side, index)
            .ok_or(RuntimeError::NoMemberAt { side, index })?;
        if side != target_side(subject_side, skill.scope) || !fits(skill.scope, target) {
            return Err(RuntimeError::InvalidTarget {
                skill: skill.id,
                target: target.id,
            });
        }
        let target = target.id;

        match action.select_target(skill, index, target)? {
            Selection::Continue { chosen, max } => {
                if self.config.selection_indicators {
                    self.selection.indicators.push(Indicator {
                        target,
                        ordinal: chosen,
                    });
                }
                debug!(target: "runtime::battle", subject = %action.subject, chosen, max, "target picked");
                Ok(SelectionProgress::Continue { chosen, max })
            }
            Selection::Complete => {
                let subject = action.subject;
                self.selection.indicators.clear();
                if let Some(action) = self.selection.pending.take() {
                    self.set_action(action)?;
                }
                debug!(target: "runtime::battle", subject = %subject, "selection complete");
                Ok(SelectionProgress::Complete { subject })
            }
        }
    }

    /// Drops the partial target list and closes the session.
    pub fn on_target_cancel(&mut self) -> Result<()> {
        let mut action = self.selection.pending.take().ok_or(RuntimeError::NotSelecting)?;
        action.reset_targets();
        self.selection.indicators.clear();
        debug!(target: "runtime::battle", subject = %action.subject, "selection cancelled");
        Ok(())
    }
}
