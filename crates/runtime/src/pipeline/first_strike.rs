//! First strike interception.
//!
//! When a target holds a first strike directive that the incoming action
//! triggers, the target's counter is applied to the subject before the
//! original action. The original action resumes only if its subject survives.

use battle_core::action::strike::{self, StrikeCheck};
use battle_core::action::{apply, pay_cost};
use tracing::{debug, trace};

use super::{Flow, InvocationContext, InvocationInterceptor, record_result};
use crate::error::Result;
use crate::log::LogStep;

/// Where a single invocation ended up in the first strike sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum StrikePhase {
    /// Not eligible; the action proceeds untouched.
    Idle,
    /// A directive was confirmed for the target.
    Eligible,
    /// The counter has been applied to the subject.
    Intercepted,
    /// The subject survived; the original action is queued to resume.
    Resumed,
    /// The subject died to the counter; the original action is dropped.
    Aborted,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstStrikeInterceptor;

impl FirstStrikeInterceptor {
    pub const NAME: &'static str = "first_strike";
    pub const PRIORITY: i32 = 10;

    /// Runs the state machine for one (subject, target) pair.
    pub fn evaluate(ctx: &mut InvocationContext<'_, '_>) -> Result<StrikePhase> {
        let subject_id = ctx.subject();
        let target_id = ctx.target;

        let (directive, counter, defender_name) = {
            let subject = ctx.battle.get(subject_id)?;
            let target = ctx.battle.get(target_id)?;
            let directive =
                match strike::check(ctx.env, ctx.config, ctx.battle, subject, target, ctx.action.skill)? {
                    StrikeCheck::Eligible(directive) => directive,
                    StrikeCheck::Ineligible(reason) => {
                        trace!(
                            target: "runtime::pipeline",
                            subject = %subject_id,
                            target_id = %target_id,
                            reason = %reason,
                            "no first strike",
                        );
                        return Ok(StrikePhase::Idle);
                    }
                };
            let counter = strike::counter_action(ctx.env, ctx.config, target, subject, &directive)?;
            (directive, counter, target.name.clone())
        };
        trace!(
            target: "runtime::pipeline",
            phase = %StrikePhase::Eligible,
            defender = %target_id,
            skill = %counter.skill,
        );

        let skill = ctx.env.skill(counter.skill)?;
        pay_cost(ctx.battle, target_id, skill)?;
        let scratch = &mut ctx.battle.get_mut(target_id)?.scratch;
        scratch.strike_directive = Some(directive);
        scratch.first_strike_action = Some(counter.clone());

        ctx.log.push(LogStep::AddText(format!(
            "{defender_name} {}",
            ctx.config.first_strike_message
        )));
        ctx.log.push(LogStep::PerformAction {
            subject: target_id,
            skill: counter.skill,
        });
        if let Some(animation) = skill.animation {
            ctx.log.push(LogStep::ShowAnimation {
                subject: target_id,
                targets: vec![subject_id],
                animation,
            });
            ctx.log.push(LogStep::WaitForAnimation);
        }

        let result = apply(ctx.env, ctx.config, ctx.battle, &counter, subject_id)?;
        record_result(ctx.log, target_id, &result);
        trace!(target: "runtime::pipeline", phase = %StrikePhase::Intercepted, hp_damage = ?result.hp_damage);

        let phase = if ctx.battle.get(subject_id)?.is_alive() {
            ctx.log.push(LogStep::PerformInvocation {
                action: ctx.action.clone(),
                target: target_id,
            });
            StrikePhase::Resumed
        } else {
            StrikePhase::Aborted
        };
        debug!(
            target: "runtime::pipeline",
            subject = %subject_id,
            defender = %target_id,
            counter = %counter.skill,
            phase = %phase,
            "first strike",
        );
        Ok(phase)
    }
}

impl InvocationInterceptor for FirstStrikeInterceptor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn intercept(&self, ctx: &mut InvocationContext<'_, '_>) -> Result<Flow> {
        Ok(match Self::evaluate(ctx)? {
            StrikePhase::Idle => Flow::Continue,
            _ => Flow::Handled,
        })
    }
}
