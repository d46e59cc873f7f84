//! First strike eligibility.
//!
//! A defender strikes first when its directive resolves, the attacker's
//! composed attack types pass the directive's filters, and the attacker does
//! not hold first strike priority of its own. Directive sources are consulted
//! in a fixed order and the first one that defines a directive wins:
//!
//! 1. active states, in the order they were added
//! 2. the combatant's own definition (actor or enemy species)
//! 3. equipped weapons, then armor
//! 4. the class

use super::can_pay;
use crate::config::BattleConfig;
use crate::env::{BattleEnv, OracleError};
use crate::rules::{AttackTypes, StrikeDirective, Tags};
use crate::state::{BattleState, Combatant, CombatantKind, SkillId};

/// Why a pair does not trigger first strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Ineligible {
    SameSide,
    TargetDown,
    TargetRestricted,
    SubjectHasPriority,
    NoDirective,
    FilteredOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrikeCheck {
    Eligible(StrikeDirective),
    Ineligible(Ineligible),
}

impl StrikeCheck {
    pub fn is_eligible(&self) -> bool {
        matches!(self, StrikeCheck::Eligible(_))
    }
}

/// Tags of the combatant's own definition: the actor or the enemy species.
fn innate_tags<'a>(env: &BattleEnv<'a>, who: &Combatant) -> Result<&'a Tags, OracleError> {
    let battlers = env.battlers()?;
    match &who.kind {
        CombatantKind::Ally { actor, .. } => battlers
            .actor(*actor)
            .map(|a| &a.tags)
            .ok_or(OracleError::ActorNotFound(*actor)),
        CombatantKind::Enemy { enemy } => battlers
            .enemy(*enemy)
            .map(|e| &e.tags)
            .ok_or(OracleError::EnemyNotFound(*enemy)),
    }
}

fn class_tags<'a>(env: &BattleEnv<'a>, who: &Combatant) -> Result<Option<&'a Tags>, OracleError> {
    match &who.kind {
        CombatantKind::Ally { class, .. } => env
            .battlers()?
            .class(*class)
            .map(|c| Some(&c.tags))
            .ok_or(OracleError::ClassNotFound(*class)),
        CombatantKind::Enemy { .. } => Ok(None),
    }
}

/// The first directive found along the precedence order, if any.
pub fn find_directive(
    env: &BattleEnv<'_>,
    who: &Combatant,
) -> Result<Option<StrikeDirective>, OracleError> {
    for state in who.states.iter() {
        if let Some(directive) = &env.state(state)?.tags.first_strike {
            return Ok(Some(directive.clone()));
        }
    }

    if let Some(directive) = &innate_tags(env, who)?.first_strike {
        return Ok(Some(directive.clone()));
    }

    let items = env.items()?;
    let equipment = who.equipment();
    let weapon = equipment
        .iter()
        .filter_map(|id| items.weapon(*id))
        .find_map(|w| w.tags.first_strike.clone());
    if weapon.is_some() {
        return Ok(weapon);
    }
    let armor = equipment
        .iter()
        .filter_map(|id| items.armor(*id))
        .find_map(|a| a.tags.first_strike.clone());
    if armor.is_some() {
        return Ok(armor);
    }

    Ok(class_tags(env, who)?.and_then(|tags| tags.first_strike.clone()))
}

/// Union of the attacker's own, class, equipment, state and skill tags.
pub fn composed_attack_types(
    env: &BattleEnv<'_>,
    who: &Combatant,
    skill: SkillId,
) -> Result<AttackTypes, OracleError> {
    let mut types = innate_tags(env, who)?.attack_types.clone();
    if let Some(tags) = class_tags(env, who)? {
        types.merge(&tags.attack_types);
    }
    let items = env.items()?;
    for item in who.equipment().iter().filter_map(|id| items.equipment(*id)) {
        types.merge(&item.tags.attack_types);
    }
    for state in who.states.iter() {
        types.merge(&env.state(state)?.tags.attack_types);
    }
    types.merge(&env.skill(skill)?.tags.attack_types);
    Ok(types)
}

/// Decides whether `target` strikes `subject` first when hit by `skill`.
pub fn check(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    battle: &BattleState,
    subject: &Combatant,
    target: &Combatant,
    skill: SkillId,
) -> Result<StrikeCheck, OracleError> {
    use StrikeCheck::Ineligible as No;

    if subject.side == target.side {
        return Ok(No(Ineligible::SameSide));
    }
    if target.is_dead() || battle.combatant(target.id).is_none() {
        return Ok(No(Ineligible::TargetDown));
    }
    for state in target.states.iter() {
        if env.state(state)?.cannot_act {
            return Ok(No(Ineligible::TargetRestricted));
        }
    }
    if find_directive(env, subject)?.is_some() {
        return Ok(No(Ineligible::SubjectHasPriority));
    }
    let Some(directive) = find_directive(env, target)? else {
        return Ok(No(Ineligible::NoDirective));
    };
    if config.attack_type_filtering {
        let attacker = composed_attack_types(env, subject, skill)?;
        if !directive.triggers_against(&attacker) {
            return Ok(No(Ineligible::FilteredOut));
        }
    }
    Ok(StrikeCheck::Eligible(directive))
}

/// The skill the defender will actually use.
///
/// Falls back to the basic attack when the directed skill is unknown or the
/// defender cannot afford it.
pub fn confirm_strike_skill(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    who: &Combatant,
    directive: &StrikeDirective,
) -> Result<SkillId, OracleError> {
    let skills = env.skills()?;
    Ok(match skills.skill(directive.skill) {
        Some(skill) if can_pay(who, skill) => directive.skill,
        _ => config.attack_skill_id,
    })
}

/// Builds the defender's counter aimed at the original subject.
pub fn counter_action(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    defender: &Combatant,
    subject: &Combatant,
    directive: &StrikeDirective,
) -> Result<super::Action, OracleError> {
    let skill = confirm_strike_skill(env, config, defender, directive)?;
    Ok(super::Action::aimed_at(defender.id, skill, subject.id))
}
