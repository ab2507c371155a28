//! Offline planning for finite, fully known MDPs.
//!
//! The explorer discovers the reachable states once, then either planner
//! refines a value table and a policy table over that fixed universe using
//! [`transition_outcomes`] as its only source of dynamics.

use crate::error::{Error, Result};

pub mod action;
pub mod config;
pub mod environment;
pub mod explorer;
pub mod policy_iteration;
pub mod tables;
pub mod transition;
pub mod value_iteration;


pub use action::{Action, ACTIONS};
pub use config::PlannerConfig;
pub use environment::{validate_environment, ActionNoise, Environment, ThreadSafe};
pub use explorer::{explore, Exploration};
pub use policy_iteration::PolicyIteration;
pub use tables::{PlanTables, StateSpace};
pub use transition::{transition_outcomes, TransitionOutcome};
pub use value_iteration::ValueIteration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// Value iteration met the epsilon test, or policy iteration found a
    /// stable policy.
    Converged,
    IterationCapReached,
}

/// Summary of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub status: PlanStatus,
    pub iterations: usize,
    pub states_explored: usize,
    /// Exploration stopped at `state_cap`; the plan covers a truncated universe.
    pub overflowed: bool,
    pub state_cap: usize,
}

impl PlanReport {
    pub fn is_converged(&self) -> bool {
        self.status == PlanStatus::Converged
    }

    /// Whether the plan can be used as-is: full state space and converged.
    pub fn is_complete(&self) -> bool {
        !self.overflowed && self.is_converged()
    }

    /// Turns a degraded report into an error. Overflow takes precedence over
    /// non-convergence.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.overflowed {
            return Err(Error::StateSpaceOverflow {
                cap: self.state_cap,
            });
        }
        if !self.is_converged() {
            return Err(Error::NonConvergence {
                iterations: self.iterations,
            });
        }
        Ok(())
    }
}
