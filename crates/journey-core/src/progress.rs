//! # Progress Controller
//!
//! Turns milestone selections into an eased, continuous progress fraction.
//!
//! ## Responsibilities
//! - **Selection**: Validates the milestone index and starts a transition.
//! - **Redirects**: A selection mid-transition starts from the fraction shown at that instant.
//! - **Ticking**: Evaluates the eased fraction for a host-supplied timestamp.
//!
//! ## Key Types
//! - `ProgressController`: Owns the phase and the active index.
//! - `ProgressPhase`: `Idle` or `Transitioning`.
//! - `ProgressState`: Snapshot handed to hosts and tests.
//!
//! Time is a host-supplied `f64` in seconds; it only needs to be monotonic.

use crate::config::TransitionConfig;
use crate::curve::clamp_fraction;
use crate::error::ProgressError;
use crate::milestone::milestone_fraction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressPhase {
    Idle {
        fraction: f64,
    },
    Transitioning {
        from: f64,
        to: f64,
        start: f64,
        duration: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressState {
    pub active_index: usize,
    /// Fraction produced by the last `tick` (or the idle fraction).
    pub current_fraction: f64,
    pub transition_start: f64,
    pub transition_duration: f64,
}

/// Outcome of a valid selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// A transition towards the milestone began.
    Started { from: f64, to: f64 },
    /// The milestone was already shown (or being approached); nothing changed.
    Unchanged,
}

#[derive(Clone, Debug)]
pub struct ProgressController {
    milestone_count: usize,
    active_index: usize,
    phase: ProgressPhase,
    current_fraction: f64,
    last_start: f64,
    last_duration: f64,
    transition: TransitionConfig,
}

impl ProgressController {
    pub fn new(milestone_count: usize, transition: TransitionConfig) -> Self {
        Self {
            milestone_count,
            active_index: 0,
            phase: ProgressPhase::Idle { fraction: 0.0 },
            current_fraction: 0.0,
            last_start: 0.0,
            last_duration: 0.0,
            transition,
        }
    }

    pub fn milestone_count(&self) -> usize {
        self.milestone_count
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, ProgressPhase::Transitioning { .. })
    }

    pub fn transition(&self) -> &TransitionConfig {
        &self.transition
    }

    /// Applies to transitions started after this call.
    pub fn set_transition(&mut self, transition: TransitionConfig) {
        self.transition = transition;
    }

    pub fn state(&self) -> ProgressState {
        ProgressState {
            active_index: self.active_index,
            current_fraction: self.current_fraction,
            transition_start: self.last_start,
            transition_duration: self.last_duration,
        }
    }

    /// Fraction of milestone `index` with the current milestone count.
    pub fn target_fraction(&self, index: usize) -> f64 {
        milestone_fraction(index, self.milestone_count)
    }

    /// Selects milestone `index` at time `now`.
    ///
    /// Out-of-range indices (negative ones included) are rejected without
    /// touching the state.
    pub fn select_milestone(&mut self, index: i64, now: f64) -> Result<Selection, ProgressError> {
        let index = match usize::try_from(index) {
            Ok(i) if i < self.milestone_count => i,
            _ => {
                tracing::warn!(
                    "Rejected milestone selection {} ({} milestones)",
                    index,
                    self.milestone_count
                );
                return Err(ProgressError::IndexOutOfRange {
                    index,
                    count: self.milestone_count,
                });
            }
        };

        let to = self.target_fraction(index);

        match self.phase {
            ProgressPhase::Idle { fraction } if index == self.active_index && fraction == to => {
                return Ok(Selection::Unchanged);
            }
            ProgressPhase::Transitioning { to: heading, .. }
                if index == self.active_index && heading == to =>
            {
                return Ok(Selection::Unchanged);
            }
            _ => {}
        }

        let from = self.fraction_at(now);
        let duration = self.transition.effective_duration();

        tracing::debug!(
            "Milestone {} -> {}: fraction {:.4} -> {:.4} over {:.2}s",
            self.active_index,
            index,
            from,
            to,
            duration
        );

        self.active_index = index;
        self.current_fraction = from;
        self.last_start = now;
        self.last_duration = duration;
        self.phase = ProgressPhase::Transitioning {
            from,
            to,
            start: now,
            duration,
        };

        Ok(Selection::Started { from, to })
    }

    /// Fraction displayed at `now`, without advancing the state.
    pub fn fraction_at(&self, now: f64) -> f64 {
        match self.phase {
            ProgressPhase::Idle { fraction } => fraction,
            ProgressPhase::Transitioning {
                from,
                to,
                start,
                duration,
            } => {
                let elapsed = now - start;
                if duration <= 0.0 || elapsed >= duration {
                    return to;
                }
                let x = if elapsed.is_nan() {
                    0.0
                } else {
                    (elapsed / duration).clamp(0.0, 1.0)
                };
                clamp_fraction(from + (to - from) * self.transition_easing_eval(x))
            }
        }
    }

    /// Advances to `now` and returns the fraction to draw.
    ///
    /// Repeated calls with the same `now` return the same value. Once the
    /// transition's duration has elapsed the controller settles to `Idle`.
    pub fn tick(&mut self, now: f64) -> f64 {
        let fraction = self.fraction_at(now);
        self.current_fraction = fraction;

        if let ProgressPhase::Transitioning {
            to, start, duration, ..
        } = self.phase
        {
            if duration <= 0.0 || now - start >= duration {
                tracing::debug!("Transition to milestone {} finished", self.active_index);
                self.phase = ProgressPhase::Idle { fraction: to };
            } else {
                tracing::trace!("tick {:.4}: fraction {:.5}", now, fraction);
            }
        }

        fraction
    }

    /// Re-targets the controller after the milestone set changed.
    ///
    /// The active index is clamped into range and the controller jumps to its
    /// fraction without animating.
    pub fn set_milestone_count(&mut self, count: usize) {
        if count == self.milestone_count {
            return;
        }
        self.milestone_count = count;
        self.active_index = self.active_index.min(count.saturating_sub(1));
        let fraction = self.target_fraction(self.active_index);
        self.current_fraction = fraction;
        self.phase = ProgressPhase::Idle { fraction };
    }

    fn transition_easing_eval(&self, x: f64) -> f64 {
        self.transition.easing.eval(x)
    }
}
