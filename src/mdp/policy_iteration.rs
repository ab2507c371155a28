//! Policy iteration on a dense, fixed-order projection of the explored states.
//!
//! The canonical value and policy dictionaries live in the wrapped
//! [`ValueIteration`]. This engine keeps a private array copy ordered like the
//! state space, works on it for a whole iteration, and writes it back to the
//! dictionaries at the end of every iteration.

use std::collections::HashMap;

use bitvec::prelude::*;
use log::{debug, info, warn};
use ndarray::{Array1, Array2};

use super::action::{Action, ACTIONS};
use super::config::PlannerConfig;
use super::environment::Environment;
use super::tables::{PlanTables, StateSpace};
use super::transition::{transition_outcomes, TransitionOutcome};
use super::value_iteration::ValueIteration;
use super::{PlanReport, PlanStatus};
use crate::error::{Error, Result};

/// Per-action transition matrix `T[i, j]` and expected reward vector `R[i]`.
type TransitionMatrix = (Array2<f64>, Array1<f64>);

/// Lazily built transition matrices, one per action, valid for a single state
/// universe. Cleared whenever the universe is rebuilt.
#[derive(Debug, Default)]
struct TransitionCache {
    entries: HashMap<Action, TransitionMatrix>,
}

impl TransitionCache {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn get_or_build<E: Environment>(
        &mut self,
        env: &E,
        space: &StateSpace<E::State>,
        action: Action,
    ) -> &TransitionMatrix {
        self.entries
            .entry(action)
            .or_insert_with(|| build_transition_matrix(env, space, action))
    }
}

#[cfg(feature = "parallel")]
fn outcome_rows<E: Environment>(
    env: &E,
    space: &StateSpace<E::State>,
    action: Action,
) -> Vec<Vec<TransitionOutcome<E::State>>> {
    use rayon::prelude::*;

    space
        .states()
        .par_iter()
        .map(|state| transition_outcomes(env, state, action))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn outcome_rows<E: Environment>(
    env: &E,
    space: &StateSpace<E::State>,
    action: Action,
) -> Vec<Vec<TransitionOutcome<E::State>>> {
    space
        .states()
        .iter()
        .map(|state| transition_outcomes(env, state, action))
        .collect()
}

/// Next states outside the explored universe are folded onto the source row
/// as a self-loop so the matrix stays square.
fn build_transition_matrix<E: Environment>(
    env: &E,
    space: &StateSpace<E::State>,
    action: Action,
) -> TransitionMatrix {
    let n = space.len();
    let mut transitions = Array2::<f64>::zeros((n, n));
    let mut rewards = Array1::<f64>::zeros(n);

    for (i, outcomes) in outcome_rows(env, space, action).into_iter().enumerate() {
        for outcome in outcomes {
            let j = space.index_of(&outcome.next_state).unwrap_or(i);
            transitions[[i, j]] += outcome.probability;
            rewards[i] += outcome.probability * outcome.reward;
        }
    }
    debug!("Built {}x{} transition matrix for {}", n, n, action);
    (transitions, rewards)
}

pub struct PolicyIteration<'a, E: Environment> {
    base: ValueIteration<'a, E>,
    values: Array1<f64>,
    /// Index into [`ACTIONS`] per state.
    policy: Vec<usize>,
    solved: BitVec,
    cache: TransitionCache,
    policy_stable: bool,
}

impl<'a, E: Environment> PolicyIteration<'a, E> {
    pub fn new(env: &'a E, config: PlannerConfig) -> Result<Self> {
        Ok(Self {
            base: ValueIteration::new(env, config)?,
            values: Array1::zeros(0),
            policy: Vec::new(),
            solved: BitVec::new(),
            cache: TransitionCache::default(),
            policy_stable: false,
        })
    }

    /// Explores and seeds the dictionaries exactly as value iteration does,
    /// then projects them onto the dense arrays.
    pub fn initialise(&mut self) {
        self.base.initialise();

        let states = self.base.space.states();
        self.values = states.iter().map(|s| self.base.tables.value(s)).collect();
        self.policy = states
            .iter()
            .map(|s| self.base.tables.action(s).index())
            .collect();
        self.solved = states.iter().map(|s| self.base.env.is_solved(s)).collect();
        self.cache.clear();
        self.policy_stable = false;
    }

    fn ensure_initialised(&self) -> Result<()> {
        if self.base.initialised {
            Ok(())
        } else {
            Err(Error::NotInitialised)
        }
    }

    /// Sweeps `V[rows of a] = R_a + gamma * T_a V` for each action `a` in
    /// turn, until the largest change in a sweep drops below epsilon or the
    /// sweep cap is hit. Returns the number of sweeps run.
    pub fn evaluate_policy(&mut self) -> Result<usize> {
        self.ensure_initialised()?;
        let env = self.base.env;
        let gamma = env.gamma();
        let epsilon = env.epsilon();
        let n = self.values.len();

        let mut sweeps = 0;
        while sweeps < self.base.config.max_evaluation_sweeps {
            sweeps += 1;
            let previous = self.values.clone();

            for action in ACTIONS {
                let rows: Vec<usize> = (0..n)
                    .filter(|&i| self.policy[i] == action.index() && !self.solved[i])
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                let (transitions, rewards) = self.cache.get_or_build(env, &self.base.space, action);
                // All rows of one action read the same value vector.
                let updated: Vec<f64> = rows
                    .iter()
                    .map(|&i| rewards[i] + gamma * transitions.row(i).dot(&self.values))
                    .collect();
                for (&i, value) in rows.iter().zip(updated) {
                    self.values[i] = value;
                }
            }

            let delta = (&self.values - &previous)
                .iter()
                .fold(0.0_f64, |acc, d| acc.max(d.abs()));
            if delta < epsilon {
                break;
            }
        }
        Ok(sweeps)
    }

    /// Reassigns each state to the action with the greatest one-step
    /// lookahead, provided it strictly beats the state's current value. States
    /// where nothing beats the value keep their action. Among improving actions
    /// with exactly equal lookahead, the last in [`ACTIONS`] order wins.
    /// Returns whether the policy was left unchanged.
    pub fn improve_policy(&mut self) -> Result<bool> {
        self.ensure_initialised()?;
        let env = self.base.env;
        let gamma = env.gamma();
        let previous = self.policy.clone();
        let mut best = self.values.clone();

        for action in ACTIONS {
            let (transitions, rewards) = self.cache.get_or_build(env, &self.base.space, action);
            let lookahead = transitions.dot(&self.values) * gamma + rewards;
            for (i, &q) in lookahead.iter().enumerate() {
                if !self.solved[i] && q > self.values[i] && q >= best[i] {
                    best[i] = q;
                    self.policy[i] = action.index();
                }
            }
        }

        let changed = previous
            .iter()
            .zip(&self.policy)
            .filter(|(old, new)| old != new)
            .count();
        debug!("Policy improvement changed {} states", changed);
        Ok(changed == 0)
    }

    /// Writes the dense arrays back into the canonical dictionaries.
    fn sync_tables(&mut self) {
        let base = &mut self.base;
        for (i, state) in base.space.states().iter().enumerate() {
            base.tables.update(state, self.values[i], ACTIONS[self.policy[i]]);
        }
    }

    /// Two evaluation passes, one improvement pass, then a sync. Returns the
    /// policy stability flag.
    pub fn iterate(&mut self) -> Result<bool> {
        self.evaluate_policy()?;
        self.evaluate_policy()?;
        self.policy_stable = self.improve_policy()?;
        self.sync_tables();
        Ok(self.policy_stable)
    }

    /// Explores, then iterates until the policy is stable or
    /// `max_policy_iterations` iterations have run.
    pub fn plan(&mut self) -> Result<PlanReport> {
        self.initialise();

        let mut iterations = 0;
        while iterations < self.base.config.max_policy_iterations {
            iterations += 1;
            if self.iterate()? {
                break;
            }
        }

        let status = if self.policy_stable {
            info!(
                "Policy iteration stabilised after {} iterations over {} states",
                iterations,
                self.values.len()
            );
            PlanStatus::Converged
        } else {
            warn!(
                "Policy iteration stopped at the cap of {} iterations without a stable policy",
                iterations
            );
            PlanStatus::IterationCapReached
        };
        Ok(self.base.report(status, iterations))
    }

    /// Whether the last improvement pass left the policy unchanged.
    pub fn is_converged(&self) -> bool {
        self.policy_stable
    }

    /// Value of `state`, or `0.0` if it was never explored.
    pub fn state_value(&self, state: &E::State) -> f64 {
        self.base.state_value(state)
    }

    /// Policy action for `state`, or `Forward` if it was never explored.
    pub fn select_action(&self, state: &E::State) -> Action {
        self.base.select_action(state)
    }

    pub fn tables(&self) -> &PlanTables<E::State> {
        self.base.tables()
    }

    pub fn state_space(&self) -> &StateSpace<E::State> {
        self.base.state_space()
    }

    pub fn overflowed(&self) -> bool {
        self.base.overflowed()
    }
}
