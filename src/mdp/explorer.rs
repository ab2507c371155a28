//! Depth-first discovery of the reachable state space.

use log::{debug, warn};

use super::action::ACTIONS;
use super::environment::Environment;
use super::tables::StateSpace;
use super::transition::transition_outcomes;

/// Result of exploring from an initial state.
#[derive(Debug, Clone)]
pub struct Exploration<S> {
    pub space: StateSpace<S>,
    /// `true` when the cap stopped exploration while new states were still
    /// being discovered. The space is then a strict subset of what is reachable.
    pub overflowed: bool,
}

/// Discovers states reachable from `initial` under any action and any outcome,
/// including zero-probability ones, using an explicit stack.
///
/// At most `cap` states are kept. If a further new state turns up once the cap
/// is reached, exploration stops and the result is flagged as overflowed.
pub fn explore<E: Environment>(env: &E, initial: E::State, cap: usize) -> Exploration<E::State> {
    let mut space = StateSpace::new();
    let mut stack = Vec::new();
    let mut overflowed = false;

    if cap == 0 {
        return Exploration {
            space,
            overflowed: true,
        };
    }

    // A state is pushed only on first discovery, so `space` doubles as the
    // visited set and each state is expanded exactly once.
    space.insert(initial.clone());
    stack.push(initial);

    'frontier: while let Some(state) = stack.pop() {
        for action in ACTIONS {
            for outcome in transition_outcomes(env, &state, action) {
                if space.contains(&outcome.next_state) {
                    continue;
                }
                if space.len() >= cap {
                    overflowed = true;
                    break 'frontier;
                }
                space.insert(outcome.next_state.clone());
                stack.push(outcome.next_state);
            }
        }
    }

    if overflowed {
        warn!(
            "State exploration hit the cap of {} states with {} states still on the frontier",
            cap,
            stack.len() + 1
        );
    } else {
        debug!("Explored {} reachable states", space.len());
    }

    Exploration { space, overflowed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_world::{BeeState, GridWorld, Heading};

    fn open_grid() -> GridWorld {
        GridWorld::new(3, 3, BeeState::new(0, 0, Heading::East), (2, 2))
    }

    #[test]
    fn test_explores_every_reachable_state() {
        let env = open_grid();
        let exploration = explore(&env, env.initial_state(), 10_000);
        assert!(!exploration.overflowed);
        // Every cell with every heading, the target included.
        assert_eq!(exploration.space.len(), 3 * 3 * 4);
        assert_eq!(exploration.space.states()[0], env.initial_state());
    }

    #[test]
    fn test_obstacles_shrink_the_space() {
        let env = open_grid().with_obstacle(1, 1);
        let exploration = explore(&env, env.initial_state(), 10_000);
        assert!(!exploration.overflowed);
        assert_eq!(exploration.space.len(), 8 * 4);
    }

    #[test]
    fn test_cap_is_reported_and_exact() {
        let env = open_grid();
        let exploration = explore(&env, env.initial_state(), 10);
        assert!(exploration.overflowed);
        assert_eq!(exploration.space.len(), 10);
    }

    #[test]
    fn test_cap_equal_to_reachable_size_is_not_overflow() {
        let env = open_grid();
        let exploration = explore(&env, env.initial_state(), 36);
        assert!(!exploration.overflowed);
        assert_eq!(exploration.space.len(), 36);
    }

    #[test]
    fn test_solved_initial_state_is_alone() {
        let env = GridWorld::new(2, 2, BeeState::new(1, 1, Heading::North), (1, 1));
        let exploration = explore(&env, env.initial_state(), 100);
        assert!(!exploration.overflowed);
        assert_eq!(exploration.space.len(), 1);
    }
}
