//! Stochastic transition model.
//!
//! Each chosen action expands into up to six movement sequences: one of
//! {no drift, clockwise drift, counter-clockwise drift} crossed with
//! {single, double} execution. Each sequence is run through the
//! environment's deterministic dynamics to obtain one outcome.

use super::action::Action;
use super::environment::Environment;

/// One possible result of taking an action in a state.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome<S> {
    pub probability: f64,
    pub next_state: S,
    pub reward: f64,
}

/// Enumerates every outcome of taking `action` in `state`.
///
/// Solved states are absorbing: they return a single self-loop with
/// probability 1 and reward 0. Drift branches with zero probability are
/// omitted; the no-drift branch and both execution counts are always present,
/// so the probabilities always sum to 1.
pub fn transition_outcomes<E: Environment>(
    env: &E,
    state: &E::State,
    action: Action,
) -> Vec<TransitionOutcome<E::State>> {
    if env.is_solved(state) {
        return vec![TransitionOutcome {
            probability: 1.0,
            next_state: state.clone(),
            reward: 0.0,
        }];
    }

    let noise = env.action_noise(action);
    let branches = [
        (noise.no_drift(), None),
        (noise.drift_cw, Some(Action::SpinRight)),
        (noise.drift_ccw, Some(Action::SpinLeft)),
    ];

    let mut outcomes = Vec::with_capacity(6);
    for (drift_probability, drift) in branches {
        if drift.is_some() && drift_probability <= 0.0 {
            continue;
        }
        for double in [false, true] {
            let execution_probability = if double {
                noise.double_move
            } else {
                1.0 - noise.double_move
            };
            let movements = movement_sequence(drift, action, double);
            let (reward, next_state) = run_sequence(env, state, &movements);
            outcomes.push(TransitionOutcome {
                probability: drift_probability * execution_probability,
                next_state,
                reward,
            });
        }
    }
    outcomes
}

fn movement_sequence(drift: Option<Action>, action: Action, double: bool) -> Vec<Action> {
    let mut movements = Vec::with_capacity(3);
    movements.extend(drift);
    movements.push(action);
    if double {
        movements.push(action);
    }
    movements
}

/// Applies `movements` in order, summing rewards. Stops early once a step lands
/// back on the starting state: the bee is blocked and repeating changes nothing.
fn run_sequence<E: Environment>(
    env: &E,
    start: &E::State,
    movements: &[Action],
) -> (f64, E::State) {
    let mut current = start.clone();
    let mut total_reward = 0.0;
    for &movement in movements {
        let (reward, next) = env.apply_dynamics(&current, movement);
        total_reward += reward;
        current = next;
        if current == *start {
            break;
        }
    }
    (total_reward, current)
}
