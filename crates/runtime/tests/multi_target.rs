mod common;

use std::collections::BTreeMap;

use battle_core::{
    Action, BattleConfig, BattleEnv, BattleState, CombatantId, PcgRng, Side, confirm_targets,
};
use battle_runtime::{
    ActionEvent, Battle, Event, EventBus, Indicator, RuntimeError, SelectionProgress, Topic,
};
use common::*;

struct Party {
    hero: CombatantId,
    troop: [CombatantId; 3],
}

fn setup<'a>(env: BattleEnv<'a>, config: BattleConfig) -> (Battle<'a>, Party) {
    let mut state = BattleState::new(11);
    let hero = spawn(&mut state, &env, &config, Side::Party, "Hero", SLIME);
    let troop = [
        spawn(&mut state, &env, &config, Side::Troop, "Slime A", SLIME),
        spawn(&mut state, &env, &config, Side::Troop, "Slime B", SLIME),
        spawn(&mut state, &env, &config, Side::Troop, "Slime C", SLIME),
    ];
    (Battle::new(env, config, state), Party { hero, troop })
}

#[test]
fn picks_accumulate_until_the_maximum() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, p) = setup(env, BattleConfig::default().with_selection_indicators(true));

    battle.begin_selection(p.hero, VOLLEY).unwrap();
    assert_eq!(
        battle.on_target_ok(Side::Troop, 0).unwrap(),
        SelectionProgress::Continue { chosen: 1, max: 3 }
    );
    assert_eq!(
        battle.on_target_ok(Side::Troop, 2).unwrap(),
        SelectionProgress::Continue { chosen: 2, max: 3 }
    );
    assert_eq!(
        battle.indicators(),
        &[
            Indicator { target: p.troop[0], ordinal: 1 },
            Indicator { target: p.troop[2], ordinal: 2 },
        ]
    );
    assert_eq!(
        battle.on_target_ok(Side::Troop, 1).unwrap(),
        SelectionProgress::Complete { subject: p.hero }
    );

    assert!(battle.indicators().is_empty());
    assert!(battle.pending_selection().is_none());
    let action = battle.state().get(p.hero).unwrap().action.clone().unwrap();
    assert_eq!(action.targets.as_slice(), &[p.troop[0], p.troop[2], p.troop[1]]);
}

#[test]
fn indicators_stay_hidden_when_disabled() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, p) = setup(env, BattleConfig::default());

    battle.begin_selection(p.hero, VOLLEY).unwrap();
    battle.on_target_ok(Side::Troop, 0).unwrap();
    assert!(battle.indicators().is_empty());
}

#[test]
fn cancel_resets_the_partial_list() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, p) = setup(env, BattleConfig::default().with_selection_indicators(true));

    battle.begin_selection(p.hero, VOLLEY).unwrap();
    battle.on_target_ok(Side::Troop, 0).unwrap();
    battle.on_target_ok(Side::Troop, 1).unwrap();
    battle.on_target_cancel().unwrap();

    assert!(battle.pending_selection().is_none());
    assert!(battle.indicators().is_empty());
    assert!(battle.state().get(p.hero).unwrap().action.is_none());
    assert!(matches!(
        battle.on_target_ok(Side::Troop, 2),
        Err(RuntimeError::NotSelecting)
    ));

    // A fresh session starts from zero.
    battle.begin_selection(p.hero, VOLLEY).unwrap();
    assert_eq!(
        battle.on_target_ok(Side::Troop, 2).unwrap(),
        SelectionProgress::Continue { chosen: 1, max: 3 }
    );
}

#[test]
fn single_target_skill_completes_on_first_pick() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, p) = setup(env, BattleConfig::default());

    battle.begin_selection(p.hero, ATTACK).unwrap();
    assert_eq!(
        battle.on_target_ok(Side::Troop, 2).unwrap(),
        SelectionProgress::Complete { subject: p.hero }
    );
    let action = battle.state().get(p.hero).unwrap().action.clone().unwrap();
    assert_eq!(action.target_index, Some(2));
    assert!(action.targets.is_empty());
}

#[test]
fn rejects_picks_outside_the_scope() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, p) = setup(env, BattleConfig::default());
    battle.state_mut().get_mut(p.troop[0]).unwrap().die();

    battle.begin_selection(p.hero, VOLLEY).unwrap();
    assert!(matches!(
        battle.on_target_ok(Side::Party, 0),
        Err(RuntimeError::InvalidTarget { .. })
    ));
    assert!(matches!(
        battle.on_target_ok(Side::Troop, 0),
        Err(RuntimeError::InvalidTarget { .. })
    ));
    assert!(matches!(
        battle.on_target_ok(Side::Troop, 7),
        Err(RuntimeError::NoMemberAt { index: 7, .. })
    ));
    assert!(battle.pending_selection().unwrap().targets.is_empty());
}

#[test]
fn only_the_fallen_slot_is_rebound() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let bus = EventBus::new();
    let mut events = bus.subscribe(Topic::Action);
    let (battle, p) = setup(env, BattleConfig::default());
    let mut battle = battle.with_events(bus);
    let mut presenter = RecordingPresenter::default();

    battle.begin_selection(p.hero, VOLLEY).unwrap();
    for index in 0..3 {
        battle.on_target_ok(Side::Troop, index).unwrap();
    }
    battle.state_mut().get_mut(p.troop[1]).unwrap().die();

    battle.start_turn().unwrap();
    run_turn(&mut battle, &mut presenter);

    let mut retargeted = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let Event::Action(ActionEvent::Retargeted { slot, from, to, .. }) = event {
            retargeted.push((slot, from, to));
        }
    }
    assert_eq!(retargeted.len(), 1);
    let (slot, from, to) = retargeted[0];
    assert_eq!(slot, 1);
    assert_eq!(from, p.troop[1]);
    assert!(to == p.troop[0] || to == p.troop[2]);

    let hp = |id| battle.state().get(id).unwrap().hp;
    assert_eq!(hp(p.troop[1]), 0);
    assert_eq!((100 - hp(p.troop[0])) + (100 - hp(p.troop[2])), 15);
}

#[test]
fn ally_slot_rebinds_uniformly_within_the_party() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let config = BattleConfig::default();
    let mut state = BattleState::new(5);
    let party: Vec<CombatantId> = ["Cleric", "Ann", "Bo", "Cy"]
        .into_iter()
        .map(|name| spawn(&mut state, &env, &config, Side::Party, name, SLIME))
        .collect();
    spawn(&mut state, &env, &config, Side::Troop, "Slime", SLIME);
    state.get_mut(party[2]).unwrap().die();

    let mut picked = Action::new(party[0], RALLY);
    picked.targets.extend([party[1], party[2], party[3]]);
    let mut living: Vec<CombatantId> = state.alive(Side::Party).map(|c| c.id).collect();
    living.sort();

    let mut draws: BTreeMap<CombatantId, u32> = BTreeMap::new();
    for nonce in 0..3000 {
        let mut action = picked.clone();
        let confirmation = confirm_targets(&env, &state, &mut action, nonce).unwrap();
        assert_eq!(confirmation.replaced.len(), 1);
        assert_eq!(confirmation.replaced[0].0, 1);
        assert_eq!(action.targets[0], party[1]);
        assert_eq!(action.targets[2], party[3]);

        let replacement = state.get(action.targets[1]).unwrap();
        assert!(replacement.is_alive());
        assert_eq!(replacement.side, Side::Party);
        *draws.entry(replacement.id).or_default() += 1;
    }

    assert_eq!(draws.keys().copied().collect::<Vec<_>>(), living);
    assert!(draws.values().all(|&n| n > 800), "skewed draws: {draws:?}");
}
