//! Target resolution and multi-select re-validation.
//!
//! Hand-picked targets take precedence over the skill's scope. Each picked
//! slot is re-checked by [`confirm_targets`] right before execution, since a
//! target may die or be revived between selection and resolution.

use super::{Action, ActionError};
use crate::env::{BattleEnv, RollContext, Scope, SkillData, compute_seed};
use crate::state::{BattleState, Combatant, CombatantId, Side};

/// Progress of a multi-select pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// More targets may be chosen.
    Continue { chosen: usize, max: usize },
    /// Target selection is over; return to command selection.
    Complete,
}

/// Outcome of re-validating an action's picked targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Confirmation {
    /// `(slot, previous, replacement)` for every rebound slot.
    pub replaced: Vec<(usize, CombatantId, CombatantId)>,
    /// Slots whose binding is invalid and that had no candidate to rebind to.
    pub unresolved: Vec<usize>,
}

impl Confirmation {
    pub fn is_unchanged(&self) -> bool {
        self.replaced.is_empty() && self.unresolved.is_empty()
    }
}

/// The side a scope aims at, relative to the subject.
pub fn target_side(subject: Side, scope: Scope) -> Side {
    if scope.is_for_opponent() {
        subject.opponent()
    } else {
        subject
    }
}

/// Whether `target`'s life status fits what `scope` requires.
pub fn fits(scope: Scope, target: &Combatant) -> bool {
    if scope.is_for_dead_friend() {
        target.is_dead()
    } else {
        target.is_alive()
    }
}

impl Action {
    /// Records a confirmed pick.
    ///
    /// Multi-select skills append `target` until their maximum is reached.
    /// Other skills bind `index` as their single target and complete at once.
    pub fn select_target(
        &mut self,
        skill: &SkillData,
        index: usize,
        target: CombatantId,
    ) -> Result<Selection, ActionError> {
        let Some(max) = skill.multi_target() else {
            self.target_index = Some(index);
            return Ok(Selection::Complete);
        };
        if self.targets.len() >= max {
            return Err(ActionError::SelectionFull { max });
        }
        self.targets
            .try_push(target)
            .map_err(|_| ActionError::SelectionFull { max })?;

        if self.targets.len() >= max {
            Ok(Selection::Complete)
        } else {
            Ok(Selection::Continue {
                chosen: self.targets.len(),
                max,
            })
        }
    }

    /// Drops every partial pick, as on cancel.
    pub fn reset_targets(&mut self) {
        self.targets.clear();
        self.target_index = None;
    }
}

/// Ordered targets the action applies to.
///
/// Picked slots that no longer fit the scope are skipped, which is how an
/// unresolved slot sits out this execution.
pub fn resolve_targets(
    env: &BattleEnv<'_>,
    battle: &BattleState,
    action: &Action,
) -> Result<Vec<CombatantId>, ActionError> {
    let skill = env.skill(action.skill)?;
    let subject = battle.get(action.subject)?;
    let scope = skill.scope;

    if action.is_multi_select() {
        return Ok(action
            .targets
            .iter()
            .filter_map(|id| battle.combatant(*id))
            .filter(|t| fits(scope, t))
            .map(|t| t.id)
            .collect());
    }

    let side = target_side(subject.side, scope);
    let targets = match scope {
        Scope::None => Vec::new(),
        Scope::User => vec![subject.id],
        Scope::OneEnemy | Scope::OneAlly | Scope::OneDeadAlly => {
            smooth_target(battle, side, scope, action.target_index)
                .into_iter()
                .collect()
        }
        Scope::AllEnemies | Scope::AllAllies => battle.alive_ids(side),
        Scope::AllDeadAllies => battle.dead_ids(side),
        Scope::RandomEnemies(count) => {
            let pool = battle.alive_ids(side);
            let rng = env.rng()?;
            (0..u32::from(count))
                .filter_map(|n| {
                    let seed = compute_seed(
                        battle.seed,
                        battle.nonce,
                        subject.id.0,
                        RollContext::RandomTarget as u32 + (n << 8),
                    );
                    rng.pick_index(seed, pool.len()).map(|i| pool[i])
                })
                .collect()
        }
    };
    Ok(targets)
}

/// The member at `index` if it fits the scope, else the first member that does.
fn smooth_target(
    battle: &BattleState,
    side: Side,
    scope: Scope,
    index: Option<usize>,
) -> Option<CombatantId> {
    index
        .and_then(|i| battle.member_at(side, i))
        .filter(|t| fits(scope, t))
        .or_else(|| battle.members(side).iter().find(|t| fits(scope, t)))
        .map(|t| t.id)
}

/// Re-validates every picked slot against current life status.
///
/// A living-target skill whose slot died is rebound to a uniformly random
/// living member of the aimed side. A dead-target skill whose slot is alive
/// is rebound to a uniformly random dead friend. Slots with no candidate keep
/// their old binding and are reported as unresolved.
pub fn confirm_targets(
    env: &BattleEnv<'_>,
    battle: &BattleState,
    action: &mut Action,
    nonce: u64,
) -> Result<Confirmation, ActionError> {
    let mut confirmation = Confirmation::default();
    if !action.is_multi_select() {
        return Ok(confirmation);
    }

    let skill = env.skill(action.skill)?;
    let subject = battle.get(action.subject)?;
    let rng = env.rng()?;
    let scope = skill.scope;
    let side = target_side(subject.side, scope);

    for slot in 0..action.targets.len() {
        let bound = action.targets[slot];
        let needs_rebind = match battle.combatant(bound) {
            Some(target) => !fits(scope, target),
            None => true,
        };
        if !needs_rebind {
            continue;
        }

        let pool = if scope.is_for_dead_friend() {
            battle.dead_ids(subject.side)
        } else {
            battle.alive_ids(side)
        };
        let seed = compute_seed(
            battle.seed,
            nonce,
            subject.id.0,
            RollContext::Retarget as u32 + ((slot as u32) << 8),
        );
        match rng.pick_index(seed, pool.len()) {
            Some(i) => {
                action.targets[slot] = pool[i];
                confirmation.replaced.push((slot, bound, pool[i]));
            }
            None => confirmation.unresolved.push(slot),
        }
    }
    Ok(confirmation)
}
