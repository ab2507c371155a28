use thiserror::Error;

/// Conditions under which a plan cannot be trusted, or could not be built at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Exploration stopped at the state cap while unexplored successors remained.
    /// Values and actions are an approximation over a truncated universe.
    #[error("state space exceeded the cap of {cap} states; plan covers a truncated universe")]
    StateSpaceOverflow { cap: usize },

    /// The iteration cap expired before the epsilon test passed (value iteration)
    /// or before the policy stabilised (policy iteration).
    #[error("planning did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An engine was asked to iterate before its state universe was explored.
    #[error("planner has not been initialised")]
    NotInitialised,
}

pub type Result<T> = std::result::Result<T, Error>;
