use std::fmt;

/// Primitive actions available to the bee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Forward,
    Reverse,
    SpinLeft,
    SpinRight,
}

/// All actions in their fixed iteration order. Every tie-break in the planners
/// refers to this order.
pub const ACTIONS: [Action; 4] = [
    Action::Forward,
    Action::Reverse,
    Action::SpinLeft,
    Action::SpinRight,
];

impl Action {
    /// Position of the action in [`ACTIONS`].
    pub fn index(self) -> usize {
        match self {
            Action::Forward => 0,
            Action::Reverse => 1,
            Action::SpinLeft => 2,
            Action::SpinRight => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Action> {
        ACTIONS.get(index).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Forward => "FORWARD",
            Action::Reverse => "REVERSE",
            Action::SpinLeft => "SPIN_LEFT",
            Action::SpinRight => "SPIN_RIGHT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, action) in ACTIONS.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(4), None);
    }

    #[test]
    fn test_default_is_forward() {
        assert_eq!(Action::default(), Action::Forward);
        assert_eq!(Action::SpinRight.to_string(), "SPIN_RIGHT");
    }
}
