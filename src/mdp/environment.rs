//! The interface a puzzle simulator exposes to the planners.
//!
//! The planners never look inside a state. Everything they know about the
//! world comes from the initial state, the terminal test, the deterministic
//! one-step dynamics and the per-action noise parameters.

use std::fmt::Debug;
use std::hash::Hash;

use super::action::{Action, ACTIONS};
use crate::error::{Error, Result};

/// Stochastic parameters attached to one action.
///
/// With probability `drift_cw` a SPIN_RIGHT is executed before the action,
/// with probability `drift_ccw` a SPIN_LEFT is. Independently, with
/// probability `double_move` the action itself is executed twice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionNoise {
    pub drift_cw: f64,
    pub drift_ccw: f64,
    pub double_move: f64,
}

impl ActionNoise {
    pub fn new(drift_cw: f64, drift_ccw: f64, double_move: f64) -> Self {
        Self {
            drift_cw,
            drift_ccw,
            double_move,
        }
    }

    /// Probability that the action executes without drift. Clamped at zero:
    /// rounding in the subtraction can dip below it when the drifts sum to 1.
    pub fn no_drift(&self) -> f64 {
        (1.0 - self.drift_cw - self.drift_ccw).max(0.0)
    }
}

/// Thread-safety required of environments and states. Only the `parallel`
/// feature builds transition rows across threads, so without it this is
/// implemented for every type.
#[cfg(feature = "parallel")]
pub trait ThreadSafe: Send + Sync {}

#[cfg(feature = "parallel")]
impl<T: ?Sized + Send + Sync> ThreadSafe for T {}

/// Thread-safety required of environments and states. Only the `parallel`
/// feature builds transition rows across threads, so without it this is
/// implemented for every type.
#[cfg(not(feature = "parallel"))]
pub trait ThreadSafe {}

#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> ThreadSafe for T {}

/// A fully known, finite MDP with deterministic primitive dynamics.
///
/// States must be immutable snapshots whose equality and hash reflect exactly
/// the attributes that affect future dynamics. Two physically identical
/// snapshots that compare unequal will be planned for separately, and a
/// lookup with one of them will silently hit the defaults.
pub trait Environment: ThreadSafe {
    type State: Clone + Eq + Hash + Debug + ThreadSafe;

    fn initial_state(&self) -> Self::State;

    fn is_solved(&self, state: &Self::State) -> bool;

    /// Applies a single primitive action. Must be total and deterministic.
    fn apply_dynamics(&self, state: &Self::State, action: Action) -> (f64, Self::State);

    /// Convergence threshold, > 0.
    fn epsilon(&self) -> f64;

    /// Discount factor in `[0, 1)`.
    fn gamma(&self) -> f64;

    fn action_noise(&self, action: Action) -> ActionNoise;
}

fn check_probability(name: &str, action: Action, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "{} for {} must be in [0, 1], got {}",
            name, action, p
        )));
    }
    Ok(())
}

/// Checks the parameters an environment reports before any planning starts.
pub fn validate_environment<E: Environment>(env: &E) -> Result<()> {
    let epsilon = env.epsilon();
    if !(epsilon > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "epsilon must be positive, got {}",
            epsilon
        )));
    }
    let gamma = env.gamma();
    if !(0.0..1.0).contains(&gamma) {
        return Err(Error::InvalidParameter(format!(
            "gamma must be in [0, 1), got {}",
            gamma
        )));
    }

    for action in ACTIONS {
        let noise = env.action_noise(action);
        check_probability("drift_cw", action, noise.drift_cw)?;
        check_probability("drift_ccw", action, noise.drift_ccw)?;
        check_probability("double_move", action, noise.double_move)?;
        // Small slack for parameters such as 0.7 + 0.3.
        if noise.drift_cw + noise.drift_ccw > 1.0 + 1e-12 {
            return Err(Error::InvalidParameter(format!(
                "drift_cw + drift_ccw for {} exceeds 1 ({} + {})",
                action, noise.drift_cw, noise.drift_ccw
            )));
        }
    }
    Ok(())
}
