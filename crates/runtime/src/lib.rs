//! Runtime orchestration for turn-based battles.
//!
//! This crate sequences the pure rules in `battle-core` into a playable
//! battle. Consumers build a [`Battle`] over a data environment and drive it
//! by calling [`Battle::update`] once per frame with a [`Presenter`].
//!
//! Modules are organized by responsibility:
//! - [`battle`] hosts the battle manager, turn flow and target selection
//! - [`log`] is the cooperative command queue the presenter consumes
//! - [`pipeline`] runs prioritized interceptors around each action application
//! - [`events`] provides topic-based event bus for observers
pub mod battle;
pub mod error;
pub mod events;
pub mod log;
pub mod pipeline;

pub use battle::{Battle, BattlePhase, Indicator, SelectionProgress};
pub use error::{Result, RuntimeError};
pub use events::{ActionEvent, Event, EventBus, Topic, TurnEvent};
pub use log::{BattleLog, LogStep, LogTick, Presenter, WaitMode};
pub use pipeline::{
    FirstStrikeInterceptor, Flow, InterceptorRegistry, Invocation, InvocationContext,
    InvocationInterceptor, InvocationPipeline, StrikePhase,
};
