//! Value iteration over an explored state space.
//!
//! Each sweep performs an in-place Bellman backup of every explored state in
//! discovery order, so later states already see the values updated earlier in
//! the same sweep.

use log::{debug, info, warn};

use super::action::{Action, ACTIONS};
use super::config::PlannerConfig;
use super::environment::{validate_environment, Environment};
use super::explorer::explore;
use super::tables::{PlanTables, StateSpace};
use super::transition::transition_outcomes;
use super::{PlanReport, PlanStatus};
use crate::error::{Error, Result};

pub struct ValueIteration<'a, E: Environment> {
    pub(super) env: &'a E,
    pub(super) config: PlannerConfig,
    pub(super) space: StateSpace<E::State>,
    pub(super) tables: PlanTables<E::State>,
    pub(super) overflowed: bool,
    pub(super) initialised: bool,
}

impl<'a, E: Environment> ValueIteration<'a, E> {
    /// Creates a planner. Fails if the environment or the config carries
    /// out-of-range parameters.
    pub fn new(env: &'a E, config: PlannerConfig) -> Result<Self> {
        validate_environment(env)?;
        config.validate()?;
        Ok(Self {
            env,
            config,
            space: StateSpace::new(),
            tables: PlanTables::new(),
            overflowed: false,
            initialised: false,
        })
    }

    /// Explores from the initial state and seeds every discovered state with
    /// value `0.0` and action `Forward`. Discards any previous results.
    pub fn initialise(&mut self) {
        let exploration = explore(self.env, self.env.initial_state(), self.config.max_states);
        self.tables = PlanTables::seeded(&exploration.space);
        self.space = exploration.space;
        self.overflowed = exploration.overflowed;
        self.initialised = true;
    }

    /// Expected one-step return of `action` in `state` under the current values.
    pub fn q_value(&self, state: &E::State, action: Action) -> f64 {
        let gamma = self.env.gamma();
        transition_outcomes(self.env, state, action)
            .iter()
            .map(|o| o.probability * (o.reward + gamma * self.tables.value(&o.next_state)))
            .sum()
    }

    /// Bellman-optimal value of `state`; zero for solved states.
    fn backed_up_value(&self, state: &E::State) -> f64 {
        if self.env.is_solved(state) {
            return 0.0;
        }
        ACTIONS
            .iter()
            .map(|&a| self.q_value(state, a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest gap between a stored value and its Bellman backup.
    pub fn residual(&self) -> f64 {
        self.space
            .states()
            .iter()
            .map(|s| (self.tables.value(s) - self.backed_up_value(s)).abs())
            .fold(0.0, f64::max)
    }

    /// Whether every explored value is within epsilon of its backup. Always
    /// false before [`initialise`](Self::initialise).
    pub fn is_converged(&self) -> bool {
        self.initialised && self.residual() < self.env.epsilon()
    }

    /// One in-place sweep. Each state takes the action with the strictly
    /// greatest Q-value; ties go to the earliest action in [`ACTIONS`].
    pub fn iterate(&mut self) -> Result<()> {
        if !self.initialised {
            return Err(Error::NotInitialised);
        }
        for state in self.space.states() {
            if self.env.is_solved(state) {
                self.tables.pin_value(state, 0.0);
                continue;
            }

            let mut best_value = f64::NEG_INFINITY;
            let mut best_action = Action::Forward;
            for action in ACTIONS {
                let q = self.q_value(state, action);
                if q > best_value {
                    best_value = q;
                    best_action = action;
                }
            }
            self.tables.update(state, best_value, best_action);
        }
        Ok(())
    }

    /// Explores, then sweeps until the epsilon test passes or
    /// `max_value_iterations` sweeps have run.
    ///
    /// # Examples
    ///
    /// ```
    /// use bee_planner::grid_world::{BeeState, GridWorld, Heading};
    /// use bee_planner::mdp::{Action, Environment, PlannerConfig, ValueIteration};
    ///
    /// // A 1x4 corridor with the target at the far end.
    /// let env = GridWorld::new(1, 4, BeeState::new(0, 0, Heading::East), (0, 3));
    /// let mut vi = ValueIteration::new(&env, PlannerConfig::default()).unwrap();
    /// let report = vi.plan().unwrap();
    ///
    /// assert!(report.is_complete());
    /// assert_eq!(vi.select_action(&env.initial_state()), Action::Forward);
    /// ```
    pub fn plan(&mut self) -> Result<PlanReport> {
        self.initialise();

        let mut iterations = 0;
        let status = loop {
            if self.is_converged() {
                break PlanStatus::Converged;
            }
            if iterations >= self.config.max_value_iterations {
                break PlanStatus::IterationCapReached;
            }
            self.iterate()?;
            iterations += 1;
            debug!("Value iteration sweep {} done", iterations);
        };

        match status {
            PlanStatus::Converged => info!(
                "Value iteration converged after {} iterations over {} states",
                iterations,
                self.space.len()
            ),
            PlanStatus::IterationCapReached => warn!(
                "Value iteration stopped at the cap of {} iterations, residual {}",
                iterations,
                self.residual()
            ),
        }

        Ok(self.report(status, iterations))
    }

    pub(super) fn report(&self, status: PlanStatus, iterations: usize) -> PlanReport {
        PlanReport {
            status,
            iterations,
            states_explored: self.space.len(),
            overflowed: self.overflowed,
            state_cap: self.config.max_states,
        }
    }

    /// Value of `state`, or `0.0` if it was never explored.
    pub fn state_value(&self, state: &E::State) -> f64 {
        self.tables.value(state)
    }

    /// Policy action for `state`, or `Forward` if it was never explored.
    pub fn select_action(&self, state: &E::State) -> Action {
        self.tables.action(state)
    }

    pub fn tables(&self) -> &PlanTables<E::State> {
        &self.tables
    }

    pub fn state_space(&self) -> &StateSpace<E::State> {
        &self.space
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}
