use std::collections::HashMap;
use std::hash::Hash;

use super::action::Action;

/// The explored states in discovery order, with a reverse index.
///
/// The ordering fixes the sweep order of value iteration and the row order of
/// the dense arrays in policy iteration, which keeps repeated runs identical.
#[derive(Debug, Clone)]
pub struct StateSpace<S> {
    states: Vec<S>,
    index: HashMap<S, usize>,
}

impl<S: Clone + Eq + Hash> StateSpace<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds `state` if it is not known yet. Returns whether it was new.
    pub fn insert(&mut self, state: S) -> bool {
        if self.index.contains_key(&state) {
            return false;
        }
        self.index.insert(state.clone(), self.states.len());
        self.states.push(state);
        true
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    pub fn index_of(&self, state: &S) -> Option<usize> {
        self.index.get(state).copied()
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: Clone + Eq + Hash> Default for StateSpace<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical value and policy dictionaries shared by both planners.
///
/// Both maps always hold the same keys. Lookups for a state that was never
/// explored fall back to value `0.0` and [`Action::Forward`]; this is a
/// deliberate default, but a lookup that keeps hitting it usually means the
/// state's equality or hash does not match the one the planner saw.
#[derive(Debug, Clone)]
pub struct PlanTables<S> {
    values: HashMap<S, f64>,
    policy: HashMap<S, Action>,
}

impl<S: Clone + Eq + Hash> PlanTables<S> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            policy: HashMap::new(),
        }
    }

    /// One `0.0` / `Forward` entry per explored state.
    pub fn seeded(space: &StateSpace<S>) -> Self {
        let mut tables = Self::new();
        for state in space.states() {
            tables.values.insert(state.clone(), 0.0);
            tables.policy.insert(state.clone(), Action::Forward);
        }
        tables
    }

    pub fn value(&self, state: &S) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    pub fn action(&self, state: &S) -> Action {
        self.policy.get(state).copied().unwrap_or_default()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    pub fn update(&mut self, state: &S, value: f64, action: Action) {
        match self.values.get_mut(state) {
            Some(v) => *v = value,
            None => {
                self.values.insert(state.clone(), value);
            }
        }
        match self.policy.get_mut(state) {
            Some(a) => *a = action,
            None => {
                self.policy.insert(state.clone(), action);
            }
        }
    }

    /// Overwrites only the value; a missing state also gets the default action.
    pub fn pin_value(&mut self, state: &S, value: f64) {
        match self.values.get_mut(state) {
            Some(v) => *v = value,
            None => {
                self.values.insert(state.clone(), value);
                self.policy.insert(state.clone(), Action::default());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Clone + Eq + Hash> Default for PlanTables<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_space_keeps_discovery_order() {
        let mut space = StateSpace::new();
        assert!(space.insert("c"));
        assert!(space.insert("a"));
        assert!(!space.insert("c"));
        assert!(space.insert("b"));
        assert_eq!(space.states(), &["c", "a", "b"]);
        assert_eq!(space.index_of(&"a"), Some(1));
        assert_eq!(space.index_of(&"z"), None);
        assert_eq!(space.len(), 3);
    }

    #[test]
    fn test_seeded_tables_and_defaults() {
        let mut space = StateSpace::new();
        space.insert(1u32);
        space.insert(2u32);
        let mut tables = PlanTables::seeded(&space);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.value(&1), 0.0);
        assert_eq!(tables.action(&2), Action::Forward);

        tables.update(&1, -3.5, Action::SpinLeft);
        assert_eq!(tables.value(&1), -3.5);
        assert_eq!(tables.action(&1), Action::SpinLeft);

        // Unknown states fall back to the defaults.
        assert_eq!(tables.value(&99), 0.0);
        assert_eq!(tables.action(&99), Action::Forward);
        assert!(!tables.contains(&99));
    }

    #[test]
    fn test_pin_value_keeps_keys_aligned() {
        let mut tables: PlanTables<u32> = PlanTables::new();
        tables.pin_value(&7, 0.0);
        assert!(tables.contains(&7));
        assert_eq!(tables.action(&7), Action::Forward);
        assert_eq!(tables.len(), 1);
    }
}
