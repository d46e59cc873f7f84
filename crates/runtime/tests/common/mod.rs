//! Shared fixture database and helpers for battle runtime tests.
#![allow(dead_code)]

use std::cell::Cell;

use battle_core::env::{DamageSpec, EnemyData};
use battle_core::{
    AnimationId, BattleConfig, BattleEnv, BattleState, Combatant, CombatantId, CombatantKind,
    ComboRule, DatabaseSnapshot, EnemyId, Scope, Side, SkillData, SkillId, StateData, StateId,
    StrikeDirective, Tags,
};
use battle_core::stats::{ParamTable, XParamTable};
use battle_runtime::{Battle, BattlePhase, LogStep, Presenter};

pub const ATTACK: SkillId = SkillId(1);
pub const FIREBALL: SkillId = SkillId(2);
pub const COUNTER: SkillId = SkillId(3);
pub const HEAVY_COUNTER: SkillId = SkillId(4);
pub const VOLLEY: SkillId = SkillId(5);
pub const LETHAL_COUNTER: SkillId = SkillId(6);
pub const RALLY: SkillId = SkillId(7);

pub const POISON: StateId = StateId(2);
pub const GUARD: StateId = StateId(3);
pub const FIRE_WARD: StateId = StateId(4);
pub const MARKED: StateId = StateId(5);
pub const FEEBLE: StateId = StateId(6);
pub const FRAIL: StateId = StateId(7);
pub const STEADY: StateId = StateId(8);
pub const FOCUSED: StateId = StateId(9);
pub const HEAVY_GUARD: StateId = StateId(10);
pub const DEADLY_GUARD: StateId = StateId(11);
pub const SLEEP: StateId = StateId(12);

pub const SLIME: EnemyId = EnemyId(1);
pub const SENTINEL: EnemyId = EnemyId(2);
pub const BAT: EnemyId = EnemyId(3);

/// Damage equal to `power`, ignoring stats.
pub fn flat(power: i32) -> DamageSpec {
    DamageSpec {
        attack_rate: 0,
        defense_rate: 0,
        ..DamageSpec::physical(power)
    }
}

fn combo(rule: &str) -> Tags {
    Tags::default().with_combo(rule.parse::<ComboRule>().expect("valid combo"))
}

fn directive(value: &str) -> Tags {
    Tags::default().with_first_strike(value.parse::<StrikeDirective>().expect("valid directive"))
}

pub fn database() -> DatabaseSnapshot {
    DatabaseSnapshot::new()
        .with_skill(
            SkillData::new(ATTACK, "Attack", Scope::OneEnemy)
                .with_damage(flat(10))
                .with_animation(AnimationId(1)),
        )
        .with_skill(
            SkillData::new(FIREBALL, "Fireball", Scope::OneEnemy)
                .with_cost(5, 0)
                .with_damage(flat(30))
                .with_animation(AnimationId(2))
                .with_tags(Tags::default().with_attack_types("fire".parse().expect("tags"))),
        )
        .with_skill(
            SkillData::new(COUNTER, "Counter", Scope::OneEnemy)
                .with_damage(flat(15))
                .with_animation(AnimationId(3)),
        )
        .with_skill(
            SkillData::new(HEAVY_COUNTER, "Heavy Counter", Scope::OneEnemy)
                .with_cost(50, 0)
                .with_damage(flat(60)),
        )
        .with_skill(
            SkillData::new(VOLLEY, "Volley", Scope::OneEnemy)
                .with_damage(flat(5))
                .with_tags(Tags::default().with_multi_target(3)),
        )
        .with_skill(
            SkillData::new(LETHAL_COUNTER, "Execution", Scope::OneEnemy).with_damage(flat(999)),
        )
        .with_skill(
            SkillData::new(RALLY, "Rally", Scope::OneAlly)
                .with_tags(Tags::default().with_multi_target(3)),
        )
        .with_state(StateData::new(POISON, "Poison"))
        .with_state(StateData::new(GUARD, "Guard").with_tags(directive("all, 3")))
        .with_state(StateData::new(FIRE_WARD, "Fire Ward").with_tags(directive("fire, 3")))
        .with_state(StateData::new(HEAVY_GUARD, "Heavy Guard").with_tags(directive("4")))
        .with_state(StateData::new(DEADLY_GUARD, "Deadly Guard").with_tags(directive("all, 6")))
        .with_state(StateData::new(MARKED, "Marked"))
        .with_state(StateData::new(FEEBLE, "Feeble").with_tags(combo("atk, -50, 5")))
        .with_state(StateData::new(FRAIL, "Frail").with_tags(combo("atk, -50, 5")))
        .with_state(StateData::new(STEADY, "Steady").with_tags(combo("hit, 10, 5")))
        .with_state(StateData::new(FOCUSED, "Focused").with_tags(combo("hit, 20, 5")))
        .with_state(StateData::new(SLEEP, "Sleep").cannot_act())
        .with_enemy(
            EnemyData::new(SLIME, "Slime", ParamTable::new([100, 20, 40, 10, 10, 10, 10, 10]))
                .with_xparams(XParamTable::new([95, 0, 0, 0, 0, 0, 0, 0, 0, 0])),
        )
        .with_enemy(
            EnemyData::new(SENTINEL, "Sentinel", ParamTable::new([100, 0, 10, 10, 10, 10, 5, 10]))
                .with_tags(directive("all, 6")),
        )
        .with_enemy(EnemyData::new(BAT, "Bat", ParamTable::new([60, 0, 10, 10, 10, 10, 30, 10])))
}

/// Adds a combatant built from an enemy template to either side.
pub fn spawn(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    side: Side,
    name: &str,
    enemy: EnemyId,
) -> CombatantId {
    let id = state
        .join(Combatant::new(
            CombatantId(0),
            name,
            side,
            CombatantKind::Enemy { enemy },
        ))
        .expect("side has room");
    state.recover_all(env, config, id).expect("template exists");
    id
}

/// Presenter whose animations last a few polls.
#[derive(Default)]
pub struct RecordingPresenter {
    pub steps: Vec<LogStep>,
    animation_polls: Cell<u32>,
}

impl RecordingPresenter {
    pub const ANIMATION_POLLS: u32 = 3;

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(LogStep::name).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                LogStep::AddText(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, step: &LogStep) {
        if matches!(step, LogStep::ShowAnimation { .. }) {
            self.animation_polls.set(Self::ANIMATION_POLLS);
        }
        self.steps.push(step.clone());
    }

    fn is_animation_playing(&self) -> bool {
        let left = self.animation_polls.get();
        if left > 0 {
            self.animation_polls.set(left - 1);
        }
        left > 0
    }
}

/// Ticks until the battle waits for input or ends.
pub fn run_turn(battle: &mut Battle<'_>, presenter: &mut RecordingPresenter) {
    for _ in 0..10_000 {
        let phase = battle.update(presenter).expect("tick");
        let settled = matches!(phase, BattlePhase::Input | BattlePhase::Ended { .. });
        if settled && !battle.log().is_busy() {
            return;
        }
    }
    panic!("battle did not settle");
}
