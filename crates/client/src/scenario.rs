//! Scripted battle run: loads an encounter and lets simple tactics play it out.
use std::time::Duration;

use anyhow::{Context, Result};
use battle_content::{ContentFactory, TagMode};
use battle_core::action::can_pay;
use battle_core::action::targeting::target_side;
use battle_core::env::{RollContext, compute_seed};
use battle_core::{
    Action, BattleEnv, BattleState, Combatant, CombatantId, CombatantKind, DatabaseSnapshot,
    ParamId, PcgRng, RngOracle, Scope, Side, SkillData,
};
use battle_runtime::{Battle, BattlePhase, Event, SelectionProgress, Topic};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::presenter::TerminalPresenter;

/// How a scripted run finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory(Side),
    TurnLimit { turns: u32 },
}

pub async fn run(config: &ClientConfig) -> Result<Outcome> {
    let tag_mode = if config.strict_tags {
        TagMode::Strict
    } else {
        TagMode::Lenient
    };
    let factory = ContentFactory::new(&config.data_dir).with_tag_mode(tag_mode);
    let battle_config = factory.load_config()?;
    let db = factory.load_database()?;
    let encounter = factory.load_encounter(&config.encounter)?;
    let seed = config.seed.unwrap_or(encounter.seed);
    info!(
        target: "client::scenario",
        encounter = %encounter.name,
        seed,
        party = encounter.party.len(),
        troop = encounter.troop.len(),
        "loaded encounter"
    );

    let rng = PcgRng;
    let env = BattleEnv::from_database(&db, &rng);
    let mut state = BattleState::new(seed);
    for actor in &encounter.party {
        state
            .join_actor(&env, &battle_config, *actor)
            .with_context(|| format!("adding {actor} to the party"))?;
    }
    for enemy in &encounter.troop {
        state
            .join_enemy(&env, &battle_config, *enemy)
            .with_context(|| format!("adding {enemy} to the troop"))?;
    }

    let mut presenter = TerminalPresenter::new(&db, &state, config.animation);
    let events = battle_runtime::EventBus::new();
    let listeners = [
        tokio::spawn(log_events(events.subscribe(Topic::Action))),
        tokio::spawn(log_events(events.subscribe(Topic::Turn))),
    ];
    let mut battle = Battle::new(env, battle_config, state).with_events(events);

    let mut ticker = frame_ticker(config.frame);
    let mut outcome = Outcome::TurnLimit {
        turns: config.max_turns,
    };
    for _ in 0..config.max_turns {
        choose_commands(&mut battle, &db)?;
        battle.start_turn()?;
        if let BattlePhase::Ended { winner } = settle(&mut battle, &mut presenter, &mut ticker).await? {
            outcome = Outcome::Victory(winner);
            break;
        }
    }

    drop(battle);
    for listener in listeners {
        if let Err(e) = listener.await {
            warn!(target: "client::scenario", error = %e, "event listener failed");
        }
    }
    Ok(outcome)
}

fn frame_ticker(frame: Duration) -> Interval {
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Ticks the battle once per frame until it waits for commands or ends.
async fn settle(
    battle: &mut Battle<'_>,
    presenter: &mut TerminalPresenter<'_>,
    ticker: &mut Interval,
) -> Result<BattlePhase> {
    loop {
        ticker.tick().await;
        let phase = battle.update(presenter)?;
        let settled = matches!(phase, BattlePhase::Input | BattlePhase::Ended { .. });
        if settled && !battle.log().is_busy() {
            return Ok(phase);
        }
    }
}

async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => debug!(target: "client::events", ?event, "event"),
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "client::events", skipped, "event listener lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Gives every living member a command for the coming turn.
///
/// Party members go through the target selection callbacks the way a player
/// would; the troop sets its commands directly.
fn choose_commands(battle: &mut Battle<'_>, db: &DatabaseSnapshot) -> Result<()> {
    let members: Vec<CombatantId> = battle.state().iter().filter(|c| c.is_alive()).map(|c| c.id).collect();
    for id in members {
        let Some(skill) = pick_skill(battle, db, id)? else {
            continue;
        };
        let side = battle.state().get(id)?.side;
        if side == Side::Party && skill.scope.needs_selection() {
            select_targets(battle, id, skill)?;
        } else {
            let mut action = Action::new(id, skill.id);
            if skill.scope.needs_selection()
                && let Some(index) = weakest(battle, skill.scope, side)
            {
                action = action.with_target_index(index);
            }
            battle.set_action(action)?;
        }
        debug!(target: "client::scenario", subject = %id, skill = %skill.name, "command set");
    }
    Ok(())
}

/// Rolls one affordable skill from the member's repertoire.
fn pick_skill<'d>(
    battle: &Battle<'_>,
    db: &'d DatabaseSnapshot,
    id: CombatantId,
) -> Result<Option<&'d SkillData>> {
    let who = battle.state().get(id)?;
    let wounded = wounded_ally(battle, who.side)?;
    let pool: Vec<&SkillData> = repertoire(db, who)
        .into_iter()
        .filter(|skill| can_pay(who, skill))
        .filter(|skill| !skill.scope.is_for_friend() || (skill.scope == Scope::OneAlly && wounded))
        .filter(|skill| skill.scope != Scope::None)
        .collect();

    let state = battle.state();
    let seed = compute_seed(state.seed, u64::from(state.turn), id.0, RollContext::RandomTarget as u32);
    Ok(PcgRng.pick_index(seed, pool.len()).map(|i| pool[i]))
}

fn repertoire<'d>(db: &'d DatabaseSnapshot, who: &Combatant) -> Vec<&'d SkillData> {
    match &who.kind {
        CombatantKind::Enemy { enemy } => db
            .enemies
            .get(enemy)
            .map(|data| data.skills.iter().filter_map(|id| db.skills.get(id)).collect())
            .unwrap_or_default(),
        CombatantKind::Ally { .. } => db.skills.values().collect(),
    }
}

fn wounded_ally(battle: &Battle<'_>, side: Side) -> Result<bool> {
    let stats = battle.stats();
    for member in battle.state().alive(side) {
        if member.hp * 2 < stats.param(member, ParamId::MaxHp)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Index of the living member with the least HP on the side `scope` aims at.
fn weakest(battle: &Battle<'_>, scope: Scope, subject_side: Side) -> Option<usize> {
    let side = target_side(subject_side, scope);
    battle
        .state()
        .members(side)
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive())
        .min_by_key(|(_, c)| c.hp)
        .map(|(index, _)| index)
}

/// Picks targets through the selection callbacks, spreading multi-target
/// picks across the living opponents weakest first.
fn select_targets(battle: &mut Battle<'_>, subject: CombatantId, skill: &SkillData) -> Result<()> {
    let subject_side = battle.state().get(subject)?.side;
    let side = target_side(subject_side, skill.scope);
    let mut candidates: Vec<(usize, i32)> = battle
        .state()
        .members(side)
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive())
        .map(|(index, c)| (index, c.hp))
        .collect();
    candidates.sort_by_key(|&(_, hp)| hp);
    if candidates.is_empty() {
        return Ok(());
    }

    battle.begin_selection(subject, skill.id)?;
    let picks = skill.multi_target().unwrap_or(1);
    for (index, _) in candidates.iter().cycle().take(picks) {
        match battle.on_target_ok(side, *index) {
            Ok(SelectionProgress::Complete { .. }) => return Ok(()),
            Ok(SelectionProgress::Continue { chosen, max }) => {
                debug!(target: "client::scenario", subject = %subject, chosen, max, "picking targets");
            }
            Err(e) => {
                battle.on_target_cancel()?;
                return Err(e.into());
            }
        }
    }
    warn!(target: "client::scenario", subject = %subject, skill = %skill.id, "selection left open");
    battle.on_target_cancel()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActorId, EnemyId, SkillId};

    fn bundled() -> ClientConfig {
        ClientConfig {
            frame: Duration::from_millis(1),
            animation: Duration::ZERO,
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn bundled_encounter_runs_to_completion() {
        let outcome = run(&bundled()).await.unwrap();
        match outcome {
            Outcome::Victory(_) => {}
            Outcome::TurnLimit { turns } => assert_eq!(turns, 30),
        }
    }

    #[tokio::test]
    async fn unknown_encounter_is_an_error() {
        let config = ClientConfig {
            encounter: "Nowhere".to_string(),
            ..bundled()
        };
        assert!(run(&config).await.is_err());
    }

    #[test]
    fn seeded_runs_pick_the_same_commands() {
        let factory = ContentFactory::new(bundled().data_dir);
        let db = factory.load_database().unwrap();
        let config = factory.load_config().unwrap();
        let rng = PcgRng;
        let env = BattleEnv::from_database(&db, &rng);

        let commands = || {
            let mut state = BattleState::new(42);
            for actor in 1..=3 {
                state.join_actor(&env, &config, ActorId(actor)).unwrap();
            }
            state.join_enemy(&env, &config, EnemyId(1)).unwrap();
            state.join_enemy(&env, &config, EnemyId(2)).unwrap();
            let mut battle = Battle::new(env, config.clone(), state);
            choose_commands(&mut battle, &db).unwrap();
            battle
                .state()
                .iter()
                .map(|c| c.action.as_ref().map(|a| a.skill))
                .collect::<Vec<Option<SkillId>>>()
        };
        let first = commands();
        assert!(first.iter().all(Option::is_some));
        assert_eq!(first, commands());
    }
}
