//! Solver strategies for the squad model.
//!
//! A solver receives a built [`SquadModel`] and returns a [`Solution`]. It
//! never edits the model. Two strategies ship with the crate:
//!
//! - [`HighsSolver`]: exact mixed-integer solve via HiGHS (`good_lp`).
//! - [`GeneticSolver`]: seeded genetic search, for when no MIP backend is
//!   wanted or the pool is too large for a time budget.
//!
//! Anything implementing [`SquadSolver`] can be plugged in through
//! [`SolverChoice::Custom`].

mod genetic;
mod highs;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use genetic::{GeneticConfig, GeneticSolver};
pub use highs::{HighsConfig, HighsSolver};

use crate::domain::{Selection, SolutionStatus};
use crate::error::{ParameterError, Result};
use crate::selection::SquadModel;

/// Raw solver output, before re-checking and assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub selection: Selection,
    /// Primary objective value (total window score) of `selection`.
    pub objective: f64,
    pub status: SolutionStatus,
    /// Generations or iterations, when the strategy counts them.
    pub iterations: Option<usize>,
}

impl Solution {
    /// Proven infeasible model of `len` variables.
    #[must_use]
    pub fn infeasible(len: usize) -> Self {
        Self {
            selection: Selection::empty(len),
            objective: 0.0,
            status: SolutionStatus::Infeasible,
            iterations: None,
        }
    }

    /// Search ended without a feasible selection.
    #[must_use]
    pub fn not_found(len: usize, iterations: Option<usize>) -> Self {
        Self {
            selection: Selection::empty(len),
            objective: 0.0,
            status: SolutionStatus::NotFound,
            iterations,
        }
    }
}

/// Strategy that picks a selection for a squad model.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SquadSolver: Send + Sync {
    /// Solver name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Solve `model`.
    ///
    /// Infeasibility is reported through [`Solution::status`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails.
    fn solve(&self, model: &SquadModel) -> Result<Solution>;
}

/// Which strategy a selection call uses.
#[derive(Clone)]
pub enum SolverChoice {
    Exact(HighsConfig),
    Genetic(GeneticConfig),
    Custom(Arc<dyn SquadSolver>),
}

impl SolverChoice {
    /// Instantiate the chosen solver.
    #[must_use]
    pub fn solver(&self) -> Arc<dyn SquadSolver> {
        match self {
            Self::Exact(config) => Arc::new(HighsSolver::new(config.clone())),
            Self::Genetic(config) => Arc::new(GeneticSolver::new(config.clone())),
            Self::Custom(solver) => Arc::clone(solver),
        }
    }
}

impl Default for SolverChoice {
    fn default() -> Self {
        Self::Exact(HighsConfig::default())
    }
}

impl fmt::Debug for SolverChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(config) => f.debug_tuple("Exact").field(config).finish(),
            Self::Genetic(config) => f.debug_tuple("Genetic").field(config).finish(),
            Self::Custom(solver) => f.debug_tuple("Custom").field(&solver.name()).finish(),
        }
    }
}

impl FromStr for SolverChoice {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "mip" | "highs" => Ok(Self::Exact(HighsConfig::default())),
            "genetic" | "ga" | "heuristic" => Ok(Self::Genetic(GeneticConfig::default())),
            _ => Err(ParameterError::UnknownSolver(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl SquadSolver for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn solve(&self, model: &SquadModel) -> Result<Solution> {
            Ok(Solution::not_found(model.len(), Some(0)))
        }
    }

    #[test]
    fn parses_solver_aliases() {
        assert!(matches!("exact".parse(), Ok(SolverChoice::Exact(_))));
        assert!(matches!("HiGHS".parse(), Ok(SolverChoice::Exact(_))));
        assert!(matches!("ga".parse(), Ok(SolverChoice::Genetic(_))));
        assert!(matches!(" genetic ".parse(), Ok(SolverChoice::Genetic(_))));
    }

    #[test]
    fn rejects_unknown_solver() {
        let err = "simplex".parse::<SolverChoice>().unwrap_err();
        assert_eq!(err, ParameterError::UnknownSolver("simplex".into()));
    }

    #[test]
    fn instantiates_named_solvers() {
        assert_eq!(SolverChoice::default().solver().name(), "highs");
        assert_eq!(
            SolverChoice::Genetic(GeneticConfig::default()).solver().name(),
            "genetic"
        );
        let custom = SolverChoice::Custom(Arc::new(Fixed));
        assert_eq!(custom.solver().name(), "fixed");
        assert_eq!(format!("{custom:?}"), "Custom(\"fixed\")");
    }

    #[test]
    fn empty_helpers_select_nothing() {
        let s = Solution::infeasible(3);
        assert_eq!(s.status, SolutionStatus::Infeasible);
        assert_eq!(s.selection.count(), 0);
        assert_eq!(s.selection.len(), 3);
        assert_eq!(Solution::not_found(2, Some(7)).iterations, Some(7));
    }
}
