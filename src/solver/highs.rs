//! Exact squad selection with HiGHS via `good_lp`.
//!
//! The lexicographic objective is solved in two phases: maximise total
//! window score, then fix the score at its optimum and minimise cost.
//! Both phases run with a zero relative MIP gap.

use good_lp::solvers::highs::{highs, HighsProblem};
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution as _, SolverModel,
    Variable,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Solution, SquadSolver};
use crate::domain::{ConstraintSense, Selection, SolutionStatus, FEASIBILITY_TOLERANCE};
use crate::error::{Error, Result};
use crate::selection::SquadModel;

/// HiGHS solver options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HighsConfig {
    /// Wall-clock limit per phase, in seconds. Unlimited when absent.
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
}

/// Exact solver backed by HiGHS.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver {
    config: HighsConfig,
}

enum Phase {
    /// Maximise total window score.
    Points,
    /// Minimise cost among selections scoring at least `floor`.
    Cost { floor: f64 },
}

/// Selection returned by one phase.
struct Outcome {
    selection: Selection,
    /// False when HiGHS stopped on a limit before proving optimality.
    proven: bool,
}

impl HighsSolver {
    #[must_use]
    pub const fn new(config: HighsConfig) -> Self {
        Self { config }
    }

    /// Run one phase. `None` when HiGHS proves the phase infeasible.
    fn run(&self, model: &SquadModel, phase: &Phase) -> Result<Option<Outcome>> {
        let mut vars = variables!();
        let x: Vec<Variable> = (0..model.len())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let points: Expression = x
            .iter()
            .zip(model.points())
            .map(|(v, c)| c * *v)
            .sum();
        let cost: Expression = x.iter().zip(model.costs()).map(|(v, c)| c * *v).sum();

        let mut problem: HighsProblem = match phase {
            Phase::Points => vars.maximise(points.clone()).using(highs),
            Phase::Cost { .. } => vars.minimise(cost).using(highs),
        };
        problem = problem
            .set_option("output_flag", false)
            .set_option("mip_rel_gap", 0.0);
        if let Some(limit) = self.config.time_limit_secs {
            problem = problem.set_option("time_limit", limit);
        }

        for c in model.constraints() {
            let terms: Vec<(usize, f64)> = model.terms(c).collect();
            if terms.is_empty() {
                continue;
            }
            let lhs: Expression = terms.iter().map(|(i, coef)| *coef * x[*i]).sum();
            let rhs = c.rhs;
            problem = match c.sense {
                ConstraintSense::GreaterEqual => problem.with(constraint!(lhs >= rhs)),
                ConstraintSense::LessEqual => problem.with(constraint!(lhs <= rhs)),
                ConstraintSense::Equal => problem.with(constraint!(lhs == rhs)),
            };
        }
        if let Phase::Cost { floor } = phase {
            let floor = *floor;
            problem = problem.with(constraint!(points >= floor));
        }

        match problem.solve() {
            Ok(solution) => Ok(Some(Outcome {
                selection: Selection::from_mask(
                    x.iter().map(|v| solution.value(*v) > 0.5).collect(),
                ),
                // The absolute gap HiGHS may stop at is below FEASIBILITY_TOLERANCE.
                proven: !matches!(solution.status(), good_lp::SolutionStatus::TimeLimit),
            })),
            Err(ResolutionError::Infeasible) => Ok(None),
            Err(e) => Err(Error::Solver(e.to_string())),
        }
    }
}

impl SquadSolver for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn solve(&self, model: &SquadModel) -> Result<Solution> {
        // HiGHS never sees constraints without terms; check them here.
        if let Some(c) = model
            .constraints()
            .iter()
            .find(|c| model.terms(c).next().is_none() && c.sense.violation(0.0, c.rhs) > 0.0)
        {
            debug!(constraint = %c.name, "empty constraint cannot be met");
            return Ok(Solution::infeasible(model.len()));
        }

        let Some(first) = self.run(model, &Phase::Points)? else {
            return Ok(Solution::infeasible(model.len()));
        };
        if !model.is_feasible(&first.selection) {
            // Only reachable when the time limit cut the search short.
            warn!("HiGHS stopped without a feasible squad");
            return Ok(Solution::not_found(model.len(), None));
        }

        let best = model.objective(&first.selection);
        let first_cost = model.cost(&first.selection);
        let first_proven = first.proven;
        let floor = best - FEASIBILITY_TOLERANCE;
        let chosen = match self.run(model, &Phase::Cost { floor })? {
            Some(second)
                if model.is_feasible(&second.selection)
                    && model.objective(&second.selection) >= best - 1e-9
                    && model.cost(&second.selection) <= first_cost =>
            {
                second
            }
            _ => {
                debug!("cost phase gave no improvement, keeping points optimum");
                first
            }
        };

        let status = if first_proven && chosen.proven {
            SolutionStatus::Optimal
        } else {
            SolutionStatus::Feasible
        };
        let selection = chosen.selection;
        debug!(
            objective = best,
            cost = %model.cost(&selection),
            %status,
            "HiGHS solve finished"
        );
        Ok(Solution {
            objective: model.objective(&selection),
            selection,
            status,
            iterations: None,
        })
    }
}
