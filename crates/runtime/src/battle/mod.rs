//! Battle manager: turn flow, action execution and the log stepper.
//!
//! [`Battle::update`] is the single cooperative tick. While the battle log
//! has queued steps it advances the log by one step; otherwise it advances
//! the turn by one unit of work (start an action, invoke it on the next
//! target, or finish the turn).
mod selection;

pub use selection::{Indicator, SelectionProgress};

use std::collections::VecDeque;

use battle_core::action::{can_pay, pay_cost};
use battle_core::env::{RollContext, compute_seed};
use battle_core::{
    Action, BattleConfig, BattleEnv, BattleState, Combatant, CombatantId, ParamId, Side, StateId,
    StatResolver, confirm_targets, resolve_targets,
};
use tracing::{debug, info, trace, warn};

use crate::error::{Result, RuntimeError};
use crate::events::{ActionEvent, EventBus, TurnEvent};
use crate::log::{BattleLog, LogStep, LogTick, Presenter};
use crate::pipeline::{InvocationContext, InvocationPipeline, Invocation, pass_through};

use selection::SelectionState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// Waiting for commands; call [`Battle::start_turn`] when they are set.
    #[default]
    Input,
    /// Picking the next subject in action order.
    Turn,
    /// Applying the current action target by target.
    Action,
    Ended { winner: Side },
}

/// The action being executed and the targets it has yet to reach.
#[derive(Clone, Debug)]
struct ActiveAction {
    action: Action,
    targets: VecDeque<CombatantId>,
}

pub struct Battle<'a> {
    env: BattleEnv<'a>,
    config: BattleConfig,
    state: BattleState,
    log: BattleLog,
    pipeline: InvocationPipeline,
    phase: BattlePhase,
    order: VecDeque<CombatantId>,
    current: Option<ActiveAction>,
    selection: SelectionState,
    events: Option<EventBus>,
}

impl<'a> Battle<'a> {
    pub fn new(env: BattleEnv<'a>, config: BattleConfig, state: BattleState) -> Self {
        Self {
            env,
            config,
            state,
            log: BattleLog::new(),
            pipeline: InvocationPipeline::with_default_interceptors(),
            phase: BattlePhase::Input,
            order: VecDeque::new(),
            current: None,
            selection: SelectionState::default(),
            events: None,
        }
    }

    pub fn with_pipeline(mut self, pipeline: InvocationPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut BattleLog {
        &mut self.log
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended { .. })
    }

    /// Effective stats as seen right now.
    pub fn stats(&self) -> StatResolver<'_> {
        StatResolver::new(self.env, &self.config, &self.state)
    }

    fn publish(&self, event: impl Into<crate::events::Event>) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }

    /// Sets the command `subject` will execute this turn.
    pub fn set_action(&mut self, action: Action) -> Result<()> {
        let subject = self.state.get_mut(action.subject)?;
        subject.action = Some(action);
        Ok(())
    }

    /// Orders every combatant holding a command and begins the turn.
    ///
    /// Faster combatants act first; ties go to the earlier id.
    pub fn start_turn(&mut self) -> Result<()> {
        if self.is_over() {
            return Ok(());
        }
        let stats = self.stats();
        let mut order = Vec::new();
        for member in self.state.iter().filter(|c| c.is_alive() && c.action.is_some()) {
            order.push((stats.param(member, ParamId::Agility)?, member.id));
        }
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        self.order = order.into_iter().map(|(_, id)| id).collect();
        self.state.turn += 1;
        self.phase = BattlePhase::Turn;
        info!(target: "runtime::battle", turn = self.state.turn, actors = self.order.len(), "turn started");
        self.publish(TurnEvent::Started {
            turn: self.state.turn,
        });
        Ok(())
    }

    /// Runs one cooperative tick.
    pub fn update(&mut self, presenter: &mut impl Presenter) -> Result<BattlePhase> {
        if self.log.is_busy() {
            if let LogTick::Effect(step) = self.log.update(presenter) {
                self.perform_effect(step)?;
            }
            return Ok(self.phase);
        }

        match self.phase {
            BattlePhase::Turn => self.process_turn()?,
            BattlePhase::Action => self.process_action()?,
            BattlePhase::Input | BattlePhase::Ended { .. } => {}
        }
        Ok(self.phase)
    }

    fn process_turn(&mut self) -> Result<()> {
        if self.judge() {
            return Ok(());
        }
        while let Some(id) = self.order.pop_front() {
            let Some(subject) = self.state.combatant(id) else {
                continue;
            };
            if subject.action.is_none() || !self.can_move(subject)? {
                trace!(target: "runtime::battle", subject = %id, "cannot act");
                if let Some(c) = self.state.combatant_mut(id) {
                    c.action = None;
                }
                continue;
            }
            return self.start_action(id);
        }
        self.end_turn();
        Ok(())
    }

    fn can_move(&self, who: &Combatant) -> Result<bool> {
        if who.is_dead() {
            return Ok(false);
        }
        for state in who.states.iter() {
            if self.env.state(state)?.cannot_act {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn start_action(&mut self, id: CombatantId) -> Result<()> {
        let mut action = self
            .state
            .get_mut(id)?
            .action
            .take()
            .ok_or(RuntimeError::NoPendingAction { subject: id })?;
        let skill = self.env.skill(action.skill)?;
        let subject = self.state.get(id)?;
        let name = subject.name.clone();

        if !can_pay(subject, skill) {
            debug!(target: "runtime::battle", subject = %id, skill = %skill.id, "cannot pay cost");
            self.log.push(LogStep::AddText(format!("{name} cannot use {}!", skill.name)));
            self.publish(ActionEvent::Skipped {
                subject: id,
                reason: "cost".into(),
            });
            return Ok(());
        }

        let nonce = self.state.next_nonce();
        let confirmation = confirm_targets(&self.env, &self.state, &mut action, nonce)?;
        for &(slot, from, to) in &confirmation.replaced {
            debug!(target: "runtime::battle", subject = %id, slot, from = %from, to = %to, "retargeted");
            self.publish(ActionEvent::Retargeted {
                subject: id,
                slot,
                from,
                to,
            });
        }
        if !confirmation.unresolved.is_empty() {
            warn!(
                target: "runtime::battle",
                subject = %id,
                slots = ?confirmation.unresolved,
                "no candidate for slots",
            );
        }

        let targets = resolve_targets(&self.env, &self.state, &action)?;
        pay_cost(&mut self.state, id, skill)?;

        self.log.push(LogStep::PushBaseLine);
        self.log.push(LogStep::PerformActionStart {
            subject: id,
            skill: skill.id,
        });
        self.log.push(LogStep::AddText(format!("{name} uses {}!", skill.name)));
        self.log.push(LogStep::PerformAction {
            subject: id,
            skill: skill.id,
        });
        if let Some(animation) = skill.animation
            && !targets.is_empty()
        {
            self.log.push(LogStep::ShowAnimation {
                subject: id,
                targets: targets.clone(),
                animation,
            });
            self.log.push(LogStep::WaitForAnimation);
        }

        debug!(target: "runtime::battle", subject = %id, skill = %skill.id, targets = ?targets, "action started");
        self.publish(ActionEvent::Started {
            subject: id,
            skill: skill.id,
            targets: targets.clone(),
        });
        self.current = Some(ActiveAction {
            action,
            targets: targets.into(),
        });
        self.phase = BattlePhase::Action;
        Ok(())
    }

    fn process_action(&mut self) -> Result<()> {
        let Some(active) = self.current.as_mut() else {
            self.phase = BattlePhase::Turn;
            return Ok(());
        };
        let subject = active.action.subject;
        let alive = self.state.combatant(subject).is_some_and(|c| c.is_alive());
        match active.targets.pop_front() {
            Some(target) if alive => {
                let action = active.action.clone();
                self.invoke(&action, target)?;
                Ok(())
            }
            _ => {
                self.end_action();
                Ok(())
            }
        }
    }

    /// Applies `action` to one target through the interceptor pipeline.
    pub fn invoke(&mut self, action: &Action, target: CombatantId) -> Result<Invocation> {
        let mut ctx = InvocationContext {
            env: &self.env,
            config: &self.config,
            battle: &mut self.state,
            log: &mut self.log,
            action,
            target,
        };
        let invocation = self.pipeline.invoke(&mut ctx)?;
        match &invocation {
            Invocation::Applied(result) => self.publish(ActionEvent::Applied {
                subject: action.subject,
                result: result.clone(),
            }),
            Invocation::Intercepted { by } => {
                let survived = self.state.combatant(action.subject).is_some_and(|c| c.is_alive());
                debug!(target: "runtime::battle", subject = %action.subject, by = *by, survived, "intercepted");
                self.publish(ActionEvent::FirstStrike {
                    defender: target,
                    subject: action.subject,
                    outcome: if survived { "resumed" } else { "aborted" }.into(),
                });
            }
        }
        Ok(invocation)
    }

    fn perform_effect(&mut self, step: LogStep) -> Result<()> {
        let LogStep::PerformInvocation { action, target } = step else {
            return Ok(());
        };
        let subject = self.state.get(action.subject)?;
        if subject.is_dead() {
            debug!(target: "runtime::battle", subject = %action.subject, "resumed action dropped");
            self.log.push(LogStep::PerformCollapse {
                target: action.subject,
            });
            return Ok(());
        }

        let mut ctx = InvocationContext {
            env: &self.env,
            config: &self.config,
            battle: &mut self.state,
            log: &mut self.log,
            action: &action,
            target,
        };
        let result = pass_through(&mut ctx)?;
        self.publish(ActionEvent::Applied {
            subject: action.subject,
            result,
        });
        Ok(())
    }

    fn end_action(&mut self) {
        if let Some(active) = self.current.take() {
            self.log.push(LogStep::PerformActionEnd {
                subject: active.action.subject,
            });
            self.log.push(LogStep::PopBaseLine);
        }
        self.phase = BattlePhase::Turn;
        self.judge();
    }

    /// Closes the turn and wipes every combatant's per-action scratch.
    pub fn end_turn(&mut self) {
        self.order.clear();
        self.current = None;
        self.state.reset_scratch();
        for member in self.state.iter_mut() {
            member.action = None;
        }
        info!(target: "runtime::battle", turn = self.state.turn, "turn ended");
        self.publish(TurnEvent::Ended {
            turn: self.state.turn,
        });
        if !self.judge() {
            self.phase = BattlePhase::Input;
        }
    }

    /// Ends the battle once a side has nobody standing.
    fn judge(&mut self) -> bool {
        if let BattlePhase::Ended { .. } = self.phase {
            return true;
        }
        let winner = if self.state.is_side_defeated(Side::Troop) {
            Side::Party
        } else if self.state.is_side_defeated(Side::Party) {
            Side::Troop
        } else {
            return false;
        };
        info!(target: "runtime::battle", winner = %winner, turn = self.state.turn, "battle ended");
        self.phase = BattlePhase::Ended { winner };
        self.order.clear();
        self.publish(TurnEvent::Victory { side: winner });
        true
    }

    /// Afflicts one uniformly random living member of `side` with `state`.
    ///
    /// Members already carrying the state are left out of the draw when the
    /// config asks for it. Returns the afflicted member, or `None` when
    /// nobody qualified.
    pub fn add_state_randomly(&mut self, side: Side, state: StateId) -> Result<Option<CombatantId>> {
        let data = self.env.state(state)?;
        let exclude = self.config.exclude_afflicted_on_random_state;
        let pool: Vec<CombatantId> = self
            .state
            .alive(side)
            .filter(|c| !(exclude && c.has_state(state)))
            .map(|c| c.id)
            .collect();

        let nonce = self.state.next_nonce();
        let actor = match side {
            Side::Party => 0,
            Side::Troop => 1,
        };
        let seed = compute_seed(self.state.seed, nonce, actor, RollContext::RandomState as u32);
        let Some(index) = self.env.rng()?.pick_index(seed, pool.len()) else {
            debug!(target: "runtime::battle", side = %side, state = %state, "no candidate for random state");
            return Ok(None);
        };

        let target = pool[index];
        let member = self.state.get_mut(target)?;
        if member.add_state(state) {
            self.log
                .push(LogStep::AddText(format!("{} is afflicted by {}!", member.name, data.name)));
            self.publish(TurnEvent::StateAdded { target, state });
        }
        Ok(Some(target))
    }
}
