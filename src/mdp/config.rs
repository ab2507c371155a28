use crate::error::{Error, Result};

/// Caps that bound the work done by the planners.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Maximum number of states the explorer may discover.
    pub max_states: usize,
    pub max_value_iterations: usize,
    pub max_policy_iterations: usize,
    /// Sweeps per policy evaluation pass.
    pub max_evaluation_sweeps: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_states: 10_000,
            max_value_iterations: 1000,
            max_policy_iterations: 100,
            max_evaluation_sweeps: 100,
        }
    }
}

impl PlannerConfig {
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn with_max_value_iterations(mut self, iterations: usize) -> Self {
        self.max_value_iterations = iterations;
        self
    }

    pub fn with_max_policy_iterations(mut self, iterations: usize) -> Self {
        self.max_policy_iterations = iterations;
        self
    }

    pub fn with_max_evaluation_sweeps(mut self, sweeps: usize) -> Self {
        self.max_evaluation_sweeps = sweeps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let caps = [
            ("max_states", self.max_states),
            ("max_value_iterations", self.max_value_iterations),
            ("max_policy_iterations", self.max_policy_iterations),
            ("max_evaluation_sweeps", self.max_evaluation_sweeps),
        ];
        for (name, value) in caps {
            if value == 0 {
                return Err(Error::InvalidParameter(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_states, 10_000);
        assert_eq!(config.max_value_iterations, 1000);
        assert_eq!(config.max_policy_iterations, 100);
        assert_eq!(config.max_evaluation_sweeps, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = PlannerConfig::default().with_max_states(0);
        assert_eq!(
            config.validate(),
            Err(Error::InvalidParameter("max_states must be at least 1".to_string()))
        );
    }
}
