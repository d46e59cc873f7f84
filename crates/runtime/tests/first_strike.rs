mod common;

use battle_core::{Action, BattleConfig, BattleEnv, BattleState, PcgRng, Side};
use battle_runtime::{
    ActionEvent, Battle, Event, EventBus, Invocation, LogStep, Topic,
};
use common::*;

fn setup<'a>(
    env: BattleEnv<'a>,
    config: BattleConfig,
    defender: battle_core::EnemyId,
) -> (Battle<'a>, battle_core::CombatantId, battle_core::CombatantId) {
    let mut state = BattleState::new(7);
    let hero = spawn(&mut state, &env, &config, Side::Party, "Hero", SLIME);
    let foe = spawn(&mut state, &env, &config, Side::Troop, "Slime", defender);
    (Battle::new(env, config, state), hero, foe)
}

fn queued(battle: &Battle<'_>) -> Vec<&'static str> {
    battle.log().steps().map(LogStep::name).collect()
}

#[test]
fn plain_combatants_pass_through() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);

    let invocation = battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();

    let Invocation::Applied(result) = invocation else {
        panic!("expected a direct application, got {invocation:?}");
    };
    assert_eq!(result.hp_damage, Some(10));
    assert_eq!(battle.state().get(slime).unwrap().hp, 90);
    assert_eq!(battle.state().get(hero).unwrap().hp, 100);
    assert_eq!(queued(&battle), vec!["display_result", "perform_damage"]);
    assert!(battle.state().get(slime).unwrap().scratch.is_clear());
}

#[test]
fn state_directive_beats_innate_directive() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, sentinel) = setup(env, BattleConfig::default(), SENTINEL);
    battle.state_mut().get_mut(sentinel).unwrap().add_state(GUARD);

    let invocation = battle.invoke(&Action::new(hero, ATTACK), sentinel).unwrap();

    assert_eq!(invocation, Invocation::Intercepted { by: "first_strike" });
    let scratch = &battle.state().get(sentinel).unwrap().scratch;
    assert_eq!(scratch.first_strike_action.as_ref().unwrap().skill, COUNTER);
    assert_eq!(scratch.strike_directive.as_ref().unwrap().skill, COUNTER);
    // Counter landed; the original attack waits in the queue.
    assert_eq!(battle.state().get(hero).unwrap().hp, 85);
    assert_eq!(battle.state().get(sentinel).unwrap().hp, 100);
    assert_eq!(queued(&battle).last(), Some(&"perform_invocation"));
}

#[test]
fn fire_filter_only_triggers_on_fire_attacks() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);
    battle.state_mut().get_mut(slime).unwrap().add_state(FIRE_WARD);

    let plain = battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();
    assert!(matches!(plain, Invocation::Applied(_)));

    let fire = battle.invoke(&Action::new(hero, FIREBALL), slime).unwrap();
    assert!(matches!(fire, Invocation::Intercepted { .. }));
}

#[test]
fn wildcard_triggers_on_any_attack() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);
    battle.state_mut().get_mut(slime).unwrap().add_state(GUARD);

    let invocation = battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();
    assert!(matches!(invocation, Invocation::Intercepted { .. }));
}

#[test]
fn unaffordable_directive_falls_back_to_attack() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);
    battle.state_mut().get_mut(slime).unwrap().add_state(HEAVY_GUARD);

    battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();

    let counter = battle.state().get(slime).unwrap().scratch.first_strike_action.clone();
    assert_eq!(counter.unwrap().skill, ATTACK);
    assert_eq!(battle.state().get(hero).unwrap().hp, 90);
    assert_eq!(battle.state().get(slime).unwrap().mp, 20);
}

#[test]
fn lethal_counter_aborts_the_original_action() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let bus = EventBus::new();
    let mut events = bus.subscribe(Topic::Action);
    let (battle, hero, sentinel) = setup(env, BattleConfig::default(), SENTINEL);
    let mut battle = battle.with_events(bus);

    battle.invoke(&Action::new(hero, ATTACK), sentinel).unwrap();

    assert!(battle.state().get(hero).unwrap().is_dead());
    assert_eq!(battle.state().get(sentinel).unwrap().hp, 100);
    let steps: Vec<_> = battle.log().steps().cloned().collect();
    assert!(steps.contains(&LogStep::PerformCollapse { target: hero }));
    assert!(!steps.iter().any(|s| matches!(s, LogStep::PerformInvocation { .. })));

    match events.try_recv().unwrap() {
        Event::Action(ActionEvent::FirstStrike { outcome, .. }) => assert_eq!(outcome, "aborted"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn subject_with_priority_is_not_preempted() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);
    battle.state_mut().get_mut(hero).unwrap().add_state(GUARD);
    battle.state_mut().get_mut(slime).unwrap().add_state(GUARD);

    let invocation = battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();
    assert!(matches!(invocation, Invocation::Applied(_)));
}

#[test]
fn restricted_target_cannot_strike_first() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let (mut battle, hero, slime) = setup(env, BattleConfig::default(), SLIME);
    let target = battle.state_mut().get_mut(slime).unwrap();
    target.add_state(GUARD);
    target.add_state(SLEEP);

    let invocation = battle.invoke(&Action::new(hero, ATTACK), slime).unwrap();
    assert!(matches!(invocation, Invocation::Applied(_)));
}

#[test]
fn intercepted_turn_resumes_once_in_queue_order() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let config = BattleConfig {
        first_strike_message: "counters swiftly!".into(),
        ..BattleConfig::default()
    };
    let (mut battle, hero, slime) = setup(env, config, SLIME);
    battle.state_mut().get_mut(slime).unwrap().add_state(GUARD);
    let mut presenter = RecordingPresenter::default();

    battle.set_action(Action::new(hero, ATTACK).with_target_index(0)).unwrap();
    battle.start_turn().unwrap();
    run_turn(&mut battle, &mut presenter);

    assert_eq!(
        presenter.texts(),
        vec!["Hero uses Attack!".to_string(), "Slime counters swiftly!".to_string()]
    );
    let shown: Vec<_> = presenter
        .steps
        .iter()
        .filter_map(|s| match s {
            LogStep::DisplayResult { subject, .. } => Some(*subject),
            _ => None,
        })
        .collect();
    assert_eq!(shown, vec![slime, hero]);
    assert_eq!(battle.state().get(hero).unwrap().hp, 85);
    assert_eq!(battle.state().get(slime).unwrap().hp, 90);
    assert!(battle.state().iter().all(|c| c.scratch.is_clear()));
}
