//! A minimal bee-on-a-grid environment.
//!
//! The bee occupies one cell and faces one of four headings. FORWARD and
//! REVERSE move one cell along the heading, the spins turn in place. Moves into
//! a wall or an obstacle leave the bee where it is but still cost. The puzzle is
//! solved once the bee stands on the target cell.

use std::collections::HashSet;

use crate::mdp::{Action, ActionNoise, Environment};

/// Cost of each primitive action, indexed by [`Action::index`].
pub const ACTION_BASE_COST: [f64; 4] = [1.0, 1.0, 0.1, 0.11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn clockwise(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn counter_clockwise(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Row and column delta of one step forward.
    fn offset(self) -> (i32, i32) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeeState {
    pub row: i32,
    pub col: i32,
    pub heading: Heading,
}

impl BeeState {
    pub fn new(row: i32, col: i32, heading: Heading) -> Self {
        Self { row, col, heading }
    }
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    rows: i32,
    cols: i32,
    obstacles: HashSet<(i32, i32)>,
    target: (i32, i32),
    start: BeeState,
    epsilon: f64,
    gamma: f64,
    noise: [ActionNoise; 4],
}

impl GridWorld {
    /// Creates a noiseless grid with `gamma = 0.99` and `epsilon = 1e-6`.
    ///
    /// # Panics
    /// Panics if the grid is empty or the start or target lies outside it.
    pub fn new(rows: i32, cols: i32, start: BeeState, target: (i32, i32)) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        let world = Self {
            rows,
            cols,
            obstacles: HashSet::new(),
            target,
            start,
            epsilon: 1e-6,
            gamma: 0.99,
            noise: [ActionNoise::default(); 4],
        };
        assert!(world.in_bounds(start.row, start.col), "Start lies outside the grid");
        assert!(world.in_bounds(target.0, target.1), "Target lies outside the grid");
        world
    }

    pub fn with_obstacle(mut self, row: i32, col: i32) -> Self {
        self.obstacles.insert((row, col));
        self
    }

    pub fn with_noise(mut self, action: Action, noise: ActionNoise) -> Self {
        self.noise[action.index()] = noise;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    fn is_free(&self, row: i32, col: i32) -> bool {
        self.in_bounds(row, col) && !self.obstacles.contains(&(row, col))
    }

    fn step(&self, state: &BeeState, direction: i32) -> BeeState {
        let (dr, dc) = state.heading.offset();
        let row = state.row + direction * dr;
        let col = state.col + direction * dc;
        if self.is_free(row, col) {
            BeeState::new(row, col, state.heading)
        } else {
            *state
        }
    }
}

impl Environment for GridWorld {
    type State = BeeState;

    fn initial_state(&self) -> BeeState {
        self.start
    }

    fn is_solved(&self, state: &BeeState) -> bool {
        (state.row, state.col) == self.target
    }

    fn apply_dynamics(&self, state: &BeeState, action: Action) -> (f64, BeeState) {
        let next = match action {
            Action::Forward => self.step(state, 1),
            Action::Reverse => self.step(state, -1),
            Action::SpinLeft => BeeState::new(state.row, state.col, state.heading.counter_clockwise()),
            Action::SpinRight => BeeState::new(state.row, state.col, state.heading.clockwise()),
        };
        (-ACTION_BASE_COST[action.index()], next)
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn gamma(&self) -> f64 {
        self.gamma
    }

    fn action_noise(&self, action: Action) -> ActionNoise {
        self.noise[action.index()]
    }
}
