mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;
use squadforge::domain::{Selection, SolutionStatus};
use squadforge::error::{Error, InfeasibleError, Result};
use squadforge::selection::{select_initial_squad, SelectionRequest, SquadModel};
use squadforge::solver::{Solution, SolverChoice, SquadSolver};

use support::pool::{no_fixtures, players_table, small_pool};

/// Returns the first fifteen players, whatever the rules say.
struct FirstFifteen;

impl SquadSolver for FirstFifteen {
    fn name(&self) -> &str {
        "first-fifteen"
    }

    fn solve(&self, model: &SquadModel) -> Result<Solution> {
        let selection = Selection::from_indices(model.len(), 0..15);
        Ok(Solution {
            objective: model.objective(&selection),
            selection,
            status: SolutionStatus::Feasible,
            iterations: None,
        })
    }
}

/// Never finds anything.
struct GiveUp;

impl SquadSolver for GiveUp {
    fn name(&self) -> &str {
        "give-up"
    }

    fn solve(&self, model: &SquadModel) -> Result<Solution> {
        Ok(Solution::not_found(model.len(), Some(3)))
    }
}

fn request(solver: Arc<dyn SquadSolver>) -> SelectionRequest {
    SelectionRequest::default()
        .with_window(1, 1)
        .with_budget(dec!(100))
        .with_solver(SolverChoice::Custom(solver))
}

#[test]
fn inconsistent_solver_output_is_reported() {
    let err = select_initial_squad(
        &players_table(small_pool()),
        &no_fixtures(),
        &request(Arc::new(FirstFifteen)),
    )
    .unwrap_err();

    match err {
        Error::Consistency { solver, violations } => {
            assert_eq!(solver, "first-fifteen");
            // Pool order is 3 GK, 6 DEF, 7 MID: the first fifteen break the quotas.
            assert!(violations.iter().any(|v| v.starts_with("GK quota")));
        }
        other => panic!("expected consistency error, got {other:?}"),
    }
}

#[test]
fn unproven_failure_is_not_reported_as_proof() {
    let err = select_initial_squad(
        &players_table(small_pool()),
        &no_fixtures(),
        &request(Arc::new(GiveUp)),
    )
    .unwrap_err();

    match err {
        Error::Infeasible(InfeasibleError {
            solver,
            proven,
            suspect,
        }) => {
            assert_eq!(solver, "give-up");
            assert!(!proven);
            // The pool can fill a legal squad, so nothing is blamed.
            assert_eq!(suspect, None);
        }
        other => panic!("expected infeasibility, got {other:?}"),
    }
}
