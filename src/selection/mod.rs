//! The squad selection routine.
//!
//! A call moves through `Validating -> Building -> Solving -> Assembling`.
//! Schema and parameter problems stop it before a model exists; a solver
//! that finds no squad stops it with an [`InfeasibleError`]. There are no
//! retries: callers may try again with another [`SolverChoice`].

mod assemble;
mod diagnose;
mod model;
mod scoring;
mod validate;
mod weighting;

use std::fmt;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info, info_span, warn};

pub use assemble::assemble;
pub use diagnose::diagnose;
pub use model::{SquadModel, Violation};
pub use scoring::window_score;
pub use validate::{FIXTURE_COLUMNS, PLAYER_COLUMNS};
pub use weighting::FixtureWeights;

use crate::domain::{CustomConstraint, SolutionStatus, SquadResult, SquadRules, Table};
use crate::error::{InfeasibleError, Result};
use crate::solver::SolverChoice;

/// Stage of a selection call, used to tag log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Building,
    Solving,
    Assembling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validating => "validating",
            Self::Building => "building",
            Self::Solving => "solving",
            Self::Assembling => "assembling",
        })
    }
}

/// Parameters of one selection call.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    /// First gameweek of the window (inclusive).
    pub gw_start: u32,
    /// Last gameweek of the window (inclusive).
    pub gw_end: u32,
    /// Budget in £m.
    pub budget: Decimal,
    pub solver: SolverChoice,
    /// Expected-points columns, one per gameweek; `ep_gw{n}` when absent.
    pub points_columns: Option<Vec<String>>,
    pub custom_constraints: Vec<CustomConstraint>,
    pub rules: SquadRules,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            gw_start: 1,
            gw_end: 4,
            budget: Decimal::ONE_HUNDRED,
            solver: SolverChoice::default(),
            points_columns: None,
            custom_constraints: Vec::new(),
            rules: SquadRules::official(),
        }
    }
}

impl SelectionRequest {
    #[must_use]
    pub fn with_window(mut self, gw_start: u32, gw_end: u32) -> Self {
        self.gw_start = gw_start;
        self.gw_end = gw_end;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Decimal) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_solver(mut self, solver: SolverChoice) -> Self {
        self.solver = solver;
        self
    }

    #[must_use]
    pub fn with_points_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.points_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: CustomConstraint) -> Self {
        self.custom_constraints.push(constraint);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: SquadRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Select the squad maximising fixture-adjusted expected points.
///
/// Among squads with equal points the cheaper one wins.
///
/// # Errors
///
/// - [`Error::Schema`](crate::error::Error::Schema) for missing columns,
///   unparseable cells or duplicate player ids.
/// - [`Error::Parameter`](crate::error::Error::Parameter) for an invalid
///   window, budget, rule set or custom constraint.
/// - [`Error::Infeasible`](crate::error::Error::Infeasible) when the solver
///   finds no legal squad.
/// - [`Error::Consistency`](crate::error::Error::Consistency) when a solver
///   returns a squad that breaks the model.
pub fn select_initial_squad(
    players: &Table,
    fixtures: &Table,
    request: &SelectionRequest,
) -> Result<SquadResult> {
    let solver = request.solver.solver();
    let span = info_span!("select_squad", solver = solver.name());
    let _guard = span.enter();

    debug!(
        stage = %Stage::Validating,
        players = players.len(),
        fixtures = fixtures.len(),
        "selection started"
    );
    let input = validate::validate(players, fixtures, request)?;

    debug!(stage = %Stage::Building, window = %input.window, "building model");
    let weights = FixtureWeights::new(&input.fixtures, input.window);
    let scored = scoring::score_players(input.players, &weights);
    let model = SquadModel::build(
        scored,
        request.rules,
        input.budget,
        &request.custom_constraints,
    )?;
    debug!(
        variables = model.len(),
        constraints = model.constraints().len(),
        "model built"
    );

    debug!(stage = %Stage::Solving, "solving");
    let started = Instant::now();
    let solution = solver.solve(&model)?;
    let solve_time = started.elapsed();

    if !solution.status.has_selection() {
        let err = InfeasibleError {
            solver: solver.name().to_owned(),
            proven: solution.status == SolutionStatus::Infeasible,
            suspect: diagnose(&model),
        };
        warn!(status = %solution.status, error = %err, "no feasible squad");
        return Err(err.into());
    }

    debug!(stage = %Stage::Assembling, status = %solution.status, "assembling squad");
    let result = assemble(&model, &solution, &weights, solver.name(), solve_time)?;

    info!(
        points = result.expected_points,
        cost = %result.total_cost,
        elapsed_ms = solve_time.as_millis() as u64,
        "squad selected"
    );
    Ok(result)
}
