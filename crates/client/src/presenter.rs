//! Terminal rendering of the battle log.
use std::collections::HashMap;
use std::time::{Duration, Instant};

use battle_core::{ActionResult, BattleState, CombatantId, DatabaseSnapshot};
use battle_runtime::{LogStep, Presenter};
use tracing::debug;

/// Prints battle text to stdout and plays animations on a wall clock.
///
/// An animation started by [`LogStep::ShowAnimation`] keeps
/// [`Presenter::is_animation_playing`] true until its duration elapses, so
/// the log stepper waits across several frames the way a real renderer would.
pub struct TerminalPresenter<'a> {
    db: &'a DatabaseSnapshot,
    names: HashMap<CombatantId, String>,
    animation: Duration,
    playing_until: Option<Instant>,
    depth: usize,
}

impl<'a> TerminalPresenter<'a> {
    pub fn new(db: &'a DatabaseSnapshot, state: &BattleState, animation: Duration) -> Self {
        Self {
            db,
            names: state.iter().map(|c| (c.id, c.name.clone())).collect(),
            animation,
            playing_until: None,
            depth: 0,
        }
    }

    fn name(&self, id: CombatantId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    fn print(&self, line: &str) {
        println!("{:indent$}{line}", "", indent = self.depth * 2);
    }

    fn describe(&self, result: &ActionResult) -> Vec<String> {
        let Some(target) = result.target else {
            return Vec::new();
        };
        let name = self.name(target);
        if result.missed {
            return vec![format!("{name} is not hit.")];
        }
        if result.evaded {
            return vec![format!("{name} evades the attack!")];
        }

        let mut lines = Vec::new();
        if result.critical {
            lines.push("A critical hit!".to_string());
        }
        match result.hp_damage {
            Some(d) if d > 0 => lines.push(format!("{name} takes {d} damage.")),
            Some(d) if d < 0 => lines.push(format!("{name} recovers {} HP.", -d)),
            Some(_) => lines.push(format!("{name} takes no damage.")),
            None => {}
        }
        if let Some(d) = result.mp_damage.filter(|d| *d != 0) {
            lines.push(format!("{name} loses {d} MP."));
        }
        for state in &result.added_states {
            let label = self.db.states.get(state).map_or("a state", |s| s.name.as_str());
            lines.push(format!("{name} is afflicted by {label}."));
        }
        for state in &result.removed_states {
            let label = self.db.states.get(state).map_or("a state", |s| s.name.as_str());
            lines.push(format!("{name} is no longer {label}."));
        }
        if result.is_no_effect() {
            lines.push(format!("There was no effect on {name}."));
        }
        lines
    }
}

impl Presenter for TerminalPresenter<'_> {
    fn present(&mut self, step: &LogStep) {
        match step {
            LogStep::AddText(text) => self.print(text),
            LogStep::PushBaseLine => self.depth += 1,
            LogStep::PopBaseLine => self.depth = self.depth.saturating_sub(1),
            LogStep::Clear => self.depth = 0,
            LogStep::ShowAnimation { animation, targets, .. } => {
                debug!(target: "client::presenter", %animation, targets = targets.len(), "animation");
                self.playing_until = Some(Instant::now() + self.animation);
            }
            LogStep::DisplayResult { result, .. } => {
                for line in self.describe(result) {
                    self.print(&line);
                }
            }
            LogStep::PerformCollapse { target } => {
                let line = format!("{} is defeated!", self.name(*target));
                self.print(&line);
            }
            other => debug!(target: "client::presenter", step = other.name(), "step"),
        }
    }

    fn is_animation_playing(&self) -> bool {
        self.playing_until.is_some_and(|until| Instant::now() < until)
    }
}
