//! Command queue driving battle presentation.
//!
//! [`BattleLog`] is a strict FIFO of [`LogStep`]s drained one step per
//! [`BattleLog::update`] call. A wait step suspends the queue until the
//! [`Presenter`] reports the awaited activity finished. Steps pushed while
//! another step executes go to the back of the queue, so they run after
//! everything that was already queued.
mod step;

use std::collections::VecDeque;

use tracing::trace;

pub use step::LogStep;

/// What the stepper is blocked on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum WaitMode {
    #[default]
    None,
    Animation,
    Movement,
    Effect,
    /// A fixed frame count from [`LogStep::Wait`].
    Frames,
}

/// Rendering side of the battle log.
///
/// Implementations start visual work in [`Presenter::present`] and report its
/// completion through the polling predicates.
pub trait Presenter {
    fn present(&mut self, step: &LogStep);

    fn is_animation_playing(&self) -> bool {
        false
    }

    fn is_any_moving(&self) -> bool {
        false
    }

    fn is_effecting(&self) -> bool {
        false
    }
}

/// Outcome of one scheduling tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTick {
    /// Nothing queued.
    Idle,
    /// Suspended on a wait condition.
    Waiting(WaitMode),
    /// A presentation or wait step ran.
    Advanced(&'static str),
    /// An effect step the caller must execute.
    Effect(LogStep),
}

#[derive(Debug, Default)]
pub struct BattleLog {
    steps: VecDeque<LogStep>,
    wait_mode: WaitMode,
    wait_frames: u32,
    lines: Vec<String>,
    base_lines: Vec<usize>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step behind everything already queued.
    pub fn push(&mut self, step: LogStep) {
        self.steps.push_back(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = LogStep>) {
        self.steps.extend(steps);
    }

    /// Queued steps, next first.
    pub fn steps(&self) -> impl Iterator<Item = &LogStep> {
        self.steps.iter()
    }

    pub fn wait_mode(&self) -> WaitMode {
        self.wait_mode
    }

    /// Visible text lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True while steps are queued or a wait is in progress.
    pub fn is_busy(&self) -> bool {
        !self.steps.is_empty() || self.wait_mode != WaitMode::None
    }

    /// Whether the stepper must hold this tick.
    ///
    /// While an animation plays only text may advance, so messages queued
    /// between animations stay in sync with what is on screen.
    pub fn should_wait(&mut self, presenter: &impl Presenter) -> bool {
        let waiting = match self.wait_mode {
            WaitMode::None => false,
            WaitMode::Frames if self.wait_frames > 0 => {
                self.wait_frames -= 1;
                true
            }
            WaitMode::Frames => false,
            WaitMode::Animation => presenter.is_animation_playing(),
            WaitMode::Movement => presenter.is_any_moving(),
            WaitMode::Effect => presenter.is_effecting(),
        };
        if !waiting {
            self.wait_mode = WaitMode::None;
        } else {
            return true;
        }

        presenter.is_animation_playing() && self.steps.front().is_some_and(|s| !s.is_text())
    }

    /// Executes at most one step.
    pub fn update(&mut self, presenter: &mut impl Presenter) -> LogTick {
        if self.should_wait(presenter) {
            return LogTick::Waiting(self.wait_mode);
        }
        let Some(step) = self.steps.pop_front() else {
            return LogTick::Idle;
        };
        trace!(target: "runtime::log", step = step.name(), queued = self.steps.len(), "step");

        if step.is_effect() {
            return LogTick::Effect(step);
        }

        let name = step.name();
        match &step {
            LogStep::WaitForAnimation => self.wait_mode = WaitMode::Animation,
            LogStep::WaitForMovement => self.wait_mode = WaitMode::Movement,
            LogStep::WaitForEffect => self.wait_mode = WaitMode::Effect,
            LogStep::Wait(frames) => {
                self.wait_mode = WaitMode::Frames;
                self.wait_frames = *frames;
            }
            LogStep::AddText(text) => self.lines.push(text.clone()),
            LogStep::PushBaseLine => self.base_lines.push(self.lines.len()),
            LogStep::PopBaseLine => {
                let base = self.base_lines.pop().unwrap_or(0);
                self.lines.truncate(base);
            }
            LogStep::Clear => {
                self.lines.clear();
                self.base_lines.clear();
            }
            _ => {}
        }
        presenter.present(&step);
        LogTick::Advanced(name)
    }
}
