//! Applying an action to one resolved target.
//!
//! Resolution runs in two phases. The outcome (hit, damage, state rolls) is
//! decided against an immutable view of the battle, then written to the
//! target. The target's paired opponent is set for the whole application so
//! combo modifiers see the attacker, and cleared again before returning.

use super::{Action, ActionError, ActionResult};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, DamageKind, HitType, RollContext, SkillData, compute_seed};
use crate::state::{BattleState, Combatant, CombatantId, StateId};
use crate::stats::{ParamId, StatResolver, XParamId};

const CRITICAL_MULTIPLIER: i32 = 3;

/// Decided outcome, before anything is written.
struct Outcome {
    result: ActionResult,
    damage: Option<(DamageKind, i32)>,
    max_hp: i32,
    max_mp: i32,
    states: Vec<StateId>,
}

/// Applies `action` to `target` and reports what happened.
pub fn apply(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    battle: &mut BattleState,
    action: &Action,
    target: CombatantId,
) -> Result<ActionResult, ActionError> {
    let nonce = battle.next_nonce();
    battle.get_mut(target)?.scratch.paired_opponent = Some(action.subject);

    let applied = decide(env, config, battle, action, target, nonce)
        .and_then(|outcome| commit(env, battle, action, target, nonce, outcome));

    if let Some(t) = battle.combatant_mut(target) {
        t.scratch.paired_opponent = None;
    }
    applied
}

fn decide(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    battle: &BattleState,
    action: &Action,
    target_id: CombatantId,
    nonce: u64,
) -> Result<Outcome, ActionError> {
    let skill = env.skill(action.skill)?;
    let rng = env.rng()?;
    let subject = battle.get(action.subject)?;
    let target = battle.get(target_id)?;
    let stats = StatResolver::new(*env, config, battle);
    let seed = |context: RollContext| compute_seed(battle.seed, nonce, target_id.0, context as u32);

    let mut outcome = Outcome {
        result: ActionResult::for_target(target_id),
        damage: None,
        max_hp: stats.param(target, ParamId::MaxHp)?,
        max_mp: stats.param(target, ParamId::MaxMp)?,
        states: Vec::new(),
    };

    let hit_chance = match skill.hit_type {
        HitType::Physical => skill.success_rate * stats.xparam(subject, XParamId::Hit)? / 100,
        HitType::Certain | HitType::Magical => skill.success_rate,
    };
    if rng.roll_d100(seed(RollContext::Hit)) as i32 > hit_chance {
        outcome.result.missed = true;
        return Ok(outcome);
    }

    let evasion = match skill.hit_type {
        HitType::Physical => stats.xparam(target, XParamId::Evasion)?,
        HitType::Magical => stats.xparam(target, XParamId::MagicEvasion)?,
        HitType::Certain => 0,
    };
    if rng.roll_d100(seed(RollContext::Evasion)) as i32 <= evasion {
        outcome.result.evaded = true;
        return Ok(outcome);
    }

    if let Some(spec) = skill.damage {
        let attack = stats.param(subject, spec.attack)?;
        let defense = stats.param(target, spec.defense)?;
        let mut value =
            (spec.power + attack * spec.attack_rate / 100 - defense * spec.defense_rate / 100).max(0);

        if spec.critical {
            let chance = stats.xparam(subject, XParamId::Critical)?
                * (100 - stats.xparam(target, XParamId::CriticalEvasion)?)
                / 100;
            if rng.roll_d100(seed(RollContext::Critical)) as i32 <= chance {
                outcome.result.critical = true;
                value *= CRITICAL_MULTIPLIER;
            }
        }

        if spec.variance > 0 {
            let amplitude = (value * spec.variance / 100).max(0) as u32;
            let roll = rng.range(seed(RollContext::Variance), 0, amplitude * 2);
            value += roll as i32 - amplitude as i32;
        }

        if spec.kind.is_recover() {
            value = -value;
        }
        outcome.damage = Some((spec.kind, value));
    }

    for (n, add) in skill.add_states.iter().enumerate() {
        let context = RollContext::AddState as u32 + ((n as u32) << 8);
        let roll = rng.roll_d100(compute_seed(battle.seed, nonce, target_id.0, context));
        if roll as i32 <= add.chance {
            outcome.states.push(add.state);
        }
    }
    Ok(outcome)
}

fn commit(
    env: &BattleEnv<'_>,
    battle: &mut BattleState,
    action: &Action,
    target_id: CombatantId,
    nonce: u64,
    outcome: Outcome,
) -> Result<ActionResult, ActionError> {
    let Outcome {
        mut result,
        damage,
        max_hp,
        max_mp,
        states,
    } = outcome;
    if !result.is_hit() {
        return Ok(result);
    }

    if let Some((kind, value)) = damage {
        if kind.targets_hp() {
            if value >= 0 {
                result.removed_states = remove_states_by_damage(env, battle, target_id, nonce)?;
            }
            let target = battle.get_mut(target_id)?;
            let was_alive = target.is_alive();
            target.set_hp(target.hp - value, max_hp);
            result.hp_damage = Some(value);
            result.knocked_out = was_alive && target.is_dead();
        } else {
            let target = battle.get_mut(target_id)?;
            target.set_mp(target.mp - value, max_mp);
            result.mp_damage = Some(value);
        }
    }

    let target = battle.get_mut(target_id)?;
    for state in states {
        if target.add_state(state) {
            result.added_states.push(state);
        }
    }

    let tp_gain = env.skill(action.skill)?.tp_gain;
    if tp_gain != 0 {
        battle.get_mut(action.subject)?.gain_tp(tp_gain);
    }
    Ok(result)
}

/// Removes states flagged as removed by damage, each on its own chance roll.
///
/// Runs for any damaging hit, including one that deals zero.
pub fn remove_states_by_damage(
    env: &BattleEnv<'_>,
    battle: &mut BattleState,
    target_id: CombatantId,
    nonce: u64,
) -> Result<Vec<StateId>, ActionError> {
    let rng = env.rng()?;
    let seed = battle.seed;
    let target = battle.get_mut(target_id)?;

    let mut removed = Vec::new();
    for (n, state) in target.states.iter().enumerate() {
        let data = env.state(state)?;
        if !data.remove_by_damage {
            continue;
        }
        let context = RollContext::RemoveByDamage as u32 + ((n as u32) << 8);
        if rng.roll_d100(compute_seed(seed, nonce, target_id.0, context)) as i32
            <= data.remove_by_damage_chance
        {
            removed.push(state);
        }
    }
    for state in &removed {
        target.remove_state(*state);
    }
    Ok(removed)
}

/// Whether `who` can afford the skill's MP and TP costs.
pub fn can_pay(who: &Combatant, skill: &SkillData) -> bool {
    who.mp >= skill.mp_cost && who.tp >= skill.tp_cost
}

/// Deducts the skill's costs from the user.
pub fn pay_cost(battle: &mut BattleState, user: CombatantId, skill: &SkillData) -> Result<(), ActionError> {
    let who = battle.get_mut(user)?;
    who.mp = (who.mp - skill.mp_cost).max(0);
    who.tp = (who.tp - skill.tp_cost).max(0);
    Ok(())
}
