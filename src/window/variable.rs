//! Two-pointer expand/contract engine.
//!
//! The right edge advances one element per step. Depending on the
//! [`Objective`], the left edge then advances while the window is invalid
//! (longest) or while it is still valid (shortest). Each element is added
//! once and removed at most once, so a scan is O(n) plus predicate cost.

use std::fmt;
use tracing::{debug, trace};

use super::state::WindowState;
use super::Window;
use crate::trace::{Action, ScanTrace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Contract only while the predicate fails; report the stable window.
    Longest,
    /// Report and contract while the predicate holds.
    Shortest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Expanding,
    Contracting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Expanding => f.write_str("expanding"),
            Phase::Contracting => f.write_str("contracting"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub additions: usize,
    pub removals: usize,
    pub windows_reported: usize,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome<S> {
    pub state: S,
    pub summary: ScanSummary,
    pub trace: Option<ScanTrace>,
}

pub struct Scanner<'a, T, S> {
    sequence: &'a [T],
    state: S,
    objective: Objective,
    trace: Option<ScanTrace>,
}

impl<'a, T, S: WindowState<T>> Scanner<'a, T, S> {
    pub fn new(sequence: &'a [T], state: S, objective: Objective) -> Self {
        Self {
            sequence,
            state,
            objective,
            trace: None,
        }
    }

    /// Records up to `limit` transitions into a [`ScanTrace`].
    pub fn with_trace(mut self, limit: usize) -> Self {
        self.trace = Some(ScanTrace::new(limit));
        self
    }

    /// Runs the scan to completion.
    ///
    /// `valid` decides whether the current window satisfies the constraint;
    /// `on_window` receives every window the objective reports.
    pub fn scan<P, R>(self, valid: P, mut on_window: R) -> ScanOutcome<S>
    where
        P: Fn(&S, Window) -> bool,
        R: FnMut(&S, Window),
    {
        let Scanner {
            sequence,
            mut state,
            objective,
            trace: mut recorder,
        } = self;
        let mut summary = ScanSummary::default();
        let mut left = 0;

        for right in 0..sequence.len() {
            state.add(&sequence[right]);
            summary.additions += 1;
            let mut window = Window::new(left, right + 1);
            record(&mut recorder, Phase::Expanding, Action::Add(right), window);

            match objective {
                Objective::Longest => {
                    let mut is_valid = valid(&state, window);
                    while !is_valid && !window.is_empty() {
                        state.remove(&sequence[left]);
                        summary.removals += 1;
                        left += 1;
                        window.left = left;
                        record(&mut recorder, Phase::Contracting, Action::Remove(left - 1), window);
                        is_valid = valid(&state, window);
                    }
                    if is_valid {
                        on_window(&state, window);
                        summary.windows_reported += 1;
                        record(&mut recorder, Phase::Expanding, Action::Report, window);
                    }
                }
                Objective::Shortest => {
                    while valid(&state, window) {
                        on_window(&state, window);
                        summary.windows_reported += 1;
                        record(&mut recorder, Phase::Contracting, Action::Report, window);
                        if window.is_empty() {
                            break;
                        }
                        state.remove(&sequence[left]);
                        summary.removals += 1;
                        left += 1;
                        window.left = left;
                        record(&mut recorder, Phase::Contracting, Action::Remove(left - 1), window);
                    }
                }
            }
        }

        debug!(
            len = sequence.len(),
            ?objective,
            additions = summary.additions,
            removals = summary.removals,
            reported = summary.windows_reported,
            "variable window scan"
        );
        ScanOutcome {
            state,
            summary,
            trace: recorder,
        }
    }
}

fn record(recorder: &mut Option<ScanTrace>, phase: Phase, action: Action, window: Window) {
    trace!(%phase, %action, %window, "window step");
    if let Some(recorder) = recorder {
        recorder.record(phase, action, window);
    }
}

/// Keeps the first optimal window seen; later windows replace it only when
/// strictly better. Empty windows are never kept, so "no match" is always
/// `None` rather than some `[i, i)`.
#[derive(Debug, Clone, Copy)]
pub struct Best {
    objective: Objective,
    window: Option<Window>,
}

impl Best {
    pub fn longest() -> Self {
        Self {
            objective: Objective::Longest,
            window: None,
        }
    }

    pub fn shortest() -> Self {
        Self {
            objective: Objective::Shortest,
            window: None,
        }
    }

    /// Returns true when `candidate` became the new best.
    pub fn offer(&mut self, candidate: Window) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let better = match (self.window, self.objective) {
            (None, _) => true,
            (Some(current), Objective::Longest) => candidate.longer_than(&current),
            (Some(current), Objective::Shortest) => candidate.shorter_than(&current),
        };
        if better {
            self.window = Some(candidate);
        }
        better
    }

    pub fn get(&self) -> Option<Window> {
        self.window
    }
}
