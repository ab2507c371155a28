//! Offline planning for stochastic bee-and-widget pushing puzzles.
//!
//! An [`mdp::Environment`] supplies deterministic one-step dynamics and
//! per-action noise. [`mdp::ValueIteration`] and [`mdp::PolicyIteration`]
//! explore the reachable states once and compute a static policy table.

pub mod error;
pub mod grid_world;
pub mod mdp;

pub use error::{Error, Result};
pub use mdp::{
    Action, ActionNoise, Environment, PlanReport, PlanStatus, PlannerConfig, PolicyIteration,
    ValueIteration,
};
