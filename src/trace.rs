//! Dry-run tables for the window engine.
//!
//! A [`ScanTrace`] is filled by [`crate::window::variable::Scanner`] when it
//! was built `with_trace`. Rendering matches the step tables used when
//! walking through a sliding-window solution by hand.

use std::fmt;

use crate::window::variable::Phase;
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add(usize),
    Remove(usize),
    Report,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add(index) => write!(f, "add {}", index),
            Action::Remove(index) => write!(f, "remove {}", index),
            Action::Report => f.write_str("report"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub step: usize,
    pub phase: Phase,
    pub action: Action,
    pub window: Window,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTrace {
    steps: Vec<TraceStep>,
    limit: usize,
    dropped: usize,
}

impl ScanTrace {
    pub fn new(limit: usize) -> Self {
        Self {
            steps: Vec::with_capacity(limit.min(64)),
            limit,
            dropped: 0,
        }
    }

    pub fn record(&mut self, phase: Phase, action: Action, window: Window) {
        if self.steps.len() >= self.limit {
            self.dropped += 1;
            return;
        }
        let step = self.steps.len() + 1;
        self.steps.push(TraceStep {
            step,
            phase,
            action,
            window,
        });
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Steps that did not fit under the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for ScanTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>5} | {:<11} | {:<10} | {}", "step", "phase", "action", "window")?;
        writeln!(f, "{:-<5}-+-{:-<11}-+-{:-<10}-+-{:-<8}", "", "", "", "")?;
        for step in &self.steps {
            writeln!(
                f,
                "{:>5} | {:<11} | {:<10} | {}",
                step.step,
                step.phase.to_string(),
                step.action.to_string(),
                step.window
            )?;
        }
        if self.dropped > 0 {
            writeln!(f, "  ... {} more steps not recorded", self.dropped)?;
        }
        Ok(())
    }
}
