mod common;

use battle_core::{Action, BattleConfig, BattleEnv, BattleState, PcgRng, Side};
use battle_runtime::{Battle, BattleLog, LogStep, LogTick, Presenter, WaitMode};
use common::*;

#[derive(Default)]
struct Signals {
    presented: Vec<String>,
    moving: bool,
}

impl Presenter for Signals {
    fn present(&mut self, step: &LogStep) {
        self.presented.push(match step {
            LogStep::AddText(text) => text.clone(),
            other => other.name().to_string(),
        });
    }

    fn is_any_moving(&self) -> bool {
        self.moving
    }
}

#[test]
fn steps_run_in_enqueue_order_across_effects() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let config = BattleConfig::default();
    let mut state = BattleState::new(1);
    let hero = spawn(&mut state, &env, &config, Side::Party, "Hero", SLIME);
    let slime = spawn(&mut state, &env, &config, Side::Troop, "Slime", SLIME);
    let mut battle = Battle::new(env, config, state);
    let mut presenter = Signals::default();

    // B executes an effect that queues its own display steps.
    battle.log_mut().extend([
        LogStep::AddText("A".into()),
        LogStep::PerformInvocation {
            action: Action::new(hero, ATTACK),
            target: slime,
        },
        LogStep::AddText("C".into()),
    ]);
    while battle.log().is_busy() {
        battle.update(&mut presenter).unwrap();
    }

    assert_eq!(presenter.presented, vec!["A", "C", "display_result", "perform_damage"]);
    assert_eq!(battle.state().get(slime).unwrap().hp, 90);
}

#[test]
fn movement_wait_holds_until_signalled() {
    let mut log = BattleLog::new();
    let mut presenter = Signals::default();
    log.extend([
        LogStep::AddText("before".into()),
        LogStep::WaitForMovement,
        LogStep::AddText("after".into()),
    ]);

    log.update(&mut presenter);
    log.update(&mut presenter);
    presenter.moving = true;
    for _ in 0..5 {
        assert_eq!(log.update(&mut presenter), LogTick::Waiting(WaitMode::Movement));
    }
    assert_eq!(presenter.presented, vec!["before", "wait_for_movement"]);

    presenter.moving = false;
    assert_eq!(log.update(&mut presenter), LogTick::Advanced("add_text"));
    assert_eq!(presenter.presented.last().map(String::as_str), Some("after"));
    assert_eq!(log.lines(), &["before".to_string(), "after".to_string()]);
}

#[test]
fn turn_presentation_waits_for_each_animation() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let config = BattleConfig::default();
    let mut state = BattleState::new(1);
    let hero = spawn(&mut state, &env, &config, Side::Party, "Hero", SLIME);
    spawn(&mut state, &env, &config, Side::Troop, "Slime", SLIME);
    let mut battle = Battle::new(env, config, state);
    let mut presenter = RecordingPresenter::default();

    battle.set_action(Action::new(hero, ATTACK).with_target_index(0)).unwrap();
    battle.start_turn().unwrap();
    run_turn(&mut battle, &mut presenter);

    assert_eq!(
        presenter.names(),
        vec![
            "push_base_line",
            "perform_action_start",
            "add_text",
            "perform_action",
            "show_animation",
            "wait_for_animation",
            "display_result",
            "perform_damage",
            "perform_action_end",
            "pop_base_line",
        ]
    );
    assert_eq!(battle.state().turn, 1);
    assert!(battle.log().lines().is_empty());
}

#[test]
fn actors_take_turns_by_agility() {
    let db = database();
    let env = BattleEnv::from_database(&db, &PcgRng);
    let config = BattleConfig::default();
    let mut state = BattleState::new(1);
    // Slime agility 10, Bat agility 30.
    let slow = spawn(&mut state, &env, &config, Side::Party, "Slow", SLIME);
    let fast = spawn(&mut state, &env, &config, Side::Troop, "Fast", BAT);
    let mut battle = Battle::new(env, config, state);
    let mut presenter = RecordingPresenter::default();

    battle.set_action(Action::new(slow, ATTACK).with_target_index(0)).unwrap();
    battle.set_action(Action::new(fast, ATTACK).with_target_index(0)).unwrap();
    battle.start_turn().unwrap();
    run_turn(&mut battle, &mut presenter);

    assert_eq!(
        presenter.texts(),
        vec!["Fast uses Attack!".to_string(), "Slow uses Attack!".to_string()]
    );
    assert_eq!(battle.state().get(slow).unwrap().hp, 90);
    assert_eq!(battle.state().get(fast).unwrap().hp, 50);
}
