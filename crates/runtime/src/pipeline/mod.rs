//! Action invocation pipeline.
//!
//! Applying an action to one resolved target goes through an ordered list of
//! [`InvocationInterceptor`]s. Each may take over the invocation by returning
//! [`Flow::Handled`]; when none does, the action is applied directly and its
//! presentation steps are queued on the battle log.
mod first_strike;
mod registry;

pub use first_strike::{FirstStrikeInterceptor, StrikePhase};
pub use registry::InterceptorRegistry;

use battle_core::{Action, ActionResult, BattleConfig, BattleEnv, BattleState, CombatantId};
use tracing::debug;

use crate::error::Result;
use crate::log::{BattleLog, LogStep};

/// Whether the remaining interceptors and the default application still run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Handled,
}

/// Everything an interceptor may read or mutate for one (subject, target) pair.
pub struct InvocationContext<'c, 'a> {
    pub env: &'c BattleEnv<'a>,
    pub config: &'c BattleConfig,
    pub battle: &'c mut BattleState,
    pub log: &'c mut BattleLog,
    pub action: &'c Action,
    pub target: CombatantId,
}

impl InvocationContext<'_, '_> {
    pub fn subject(&self) -> CombatantId {
        self.action.subject
    }
}

/// A pluggable step run before an action is applied to its target.
pub trait InvocationInterceptor: Send + Sync {
    /// Stable name used in logs and lookups.
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn intercept(&self, ctx: &mut InvocationContext<'_, '_>) -> Result<Flow>;
}

/// How an invocation was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Applied(ActionResult),
    Intercepted { by: &'static str },
}

/// Runs interceptors in priority order, then falls back to direct application.
#[derive(Clone, Default)]
pub struct InvocationPipeline {
    registry: InterceptorRegistry,
}

impl InvocationPipeline {
    pub fn new(registry: InterceptorRegistry) -> Self {
        Self { registry }
    }

    pub fn with_default_interceptors() -> Self {
        Self::new(InterceptorRegistry::default_interceptors())
    }

    pub fn invoke(&self, ctx: &mut InvocationContext<'_, '_>) -> Result<Invocation> {
        if let Some(by) = self.registry.run(ctx)? {
            return Ok(Invocation::Intercepted { by });
        }
        pass_through(ctx).map(Invocation::Applied)
    }
}

/// Applies the action to the target and queues its presentation.
pub fn pass_through(ctx: &mut InvocationContext<'_, '_>) -> Result<ActionResult> {
    let result = battle_core::action::apply(ctx.env, ctx.config, ctx.battle, ctx.action, ctx.target)?;
    debug!(
        target: "runtime::pipeline",
        subject = %ctx.action.subject,
        target_id = %ctx.target,
        skill = %ctx.action.skill,
        hp_damage = ?result.hp_damage,
        knocked_out = result.knocked_out,
        "applied",
    );
    record_result(ctx.log, ctx.action.subject, &result);
    Ok(result)
}

/// Queues the result display, damage flash and collapse for one application.
pub fn record_result(log: &mut BattleLog, subject: CombatantId, result: &ActionResult) {
    log.push(LogStep::DisplayResult {
        subject,
        result: result.clone(),
    });
    let Some(target) = result.target else {
        return;
    };
    if result.hp_damage.is_some_and(|d| d > 0) {
        log.push(LogStep::PerformDamage { target });
    }
    if result.knocked_out {
        log.push(LogStep::PerformCollapse { target });
    }
}
