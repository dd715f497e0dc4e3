//! Solver output to [`SquadResult`].

use std::collections::BTreeMap;
use std::time::Duration;

use super::model::SquadModel;
use super::weighting::FixtureWeights;
use crate::domain::{Cost, FixtureSummary, Position, SolverDiagnostics, SquadResult};
use crate::error::{Error, Result};
use crate::solver::Solution;

/// Re-check `solution` against the model and build the squad result.
///
/// # Errors
///
/// [`Error::Consistency`] when the selection has the wrong length or breaks
/// any model constraint.
pub fn assemble(
    model: &SquadModel,
    solution: &Solution,
    weights: &FixtureWeights,
    solver: &str,
    solve_time: Duration,
) -> Result<SquadResult> {
    let selection = &solution.selection;
    if selection.len() != model.len() {
        return Err(Error::Consistency {
            solver: solver.to_owned(),
            violations: vec![format!(
                "selection covers {} players, pool has {}",
                selection.len(),
                model.len()
            )],
        });
    }
    let violations = model.violations(selection);
    if !violations.is_empty() {
        return Err(Error::Consistency {
            solver: solver.to_owned(),
            violations: violations.iter().map(ToString::to_string).collect(),
        });
    }

    let mut squad: Vec<_> = selection
        .indices()
        .filter_map(|i| model.players().get(i))
        .cloned()
        .collect();
    squad.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(b.window_score.total_cmp(&a.window_score))
            .then(a.id.cmp(&b.id))
    });

    let total_cost: Cost = squad.iter().map(|p| p.cost).sum();
    let expected_points: f64 = squad.iter().map(|p| p.window_score).sum();

    let mut per_position: BTreeMap<Position, Vec<_>> =
        Position::ALL.into_iter().map(|p| (p, Vec::new())).collect();
    let mut club_counts = BTreeMap::new();
    for player in &squad {
        per_position
            .entry(player.position)
            .or_default()
            .push(player.id);
        *club_counts.entry(player.club).or_insert(0usize) += 1;
    }

    let rules = model.rules();
    let mut tally_faults = Vec::new();
    if squad.len() != rules.squad_size {
        tally_faults.push(format!(
            "squad has {} players, expected {}",
            squad.len(),
            rules.squad_size
        ));
    }
    for (position, ids) in &per_position {
        if ids.len() != rules.quota(*position) {
            tally_faults.push(format!(
                "{position} count {} != quota {}",
                ids.len(),
                rules.quota(*position)
            ));
        }
    }
    for (club, count) in &club_counts {
        if *count > rules.max_per_club {
            tally_faults.push(format!("club {club} has {count} players"));
        }
    }
    if total_cost > model.budget() {
        tally_faults.push(format!("cost {total_cost} exceeds {}", model.budget()));
    }
    if !tally_faults.is_empty() {
        return Err(Error::Consistency {
            solver: solver.to_owned(),
            violations: tally_faults,
        });
    }

    let fixtures = FixtureSummary {
        window: weights.window(),
        clubs: club_counts
            .keys()
            .map(|club| (*club, weights.club_fixtures(*club)))
            .collect(),
    };

    Ok(SquadResult {
        squad,
        total_cost,
        expected_points,
        per_position,
        club_counts,
        diagnostics: SolverDiagnostics {
            solver: solver.to_owned(),
            status: solution.status,
            objective_value: solution.objective,
            solve_time,
            iterations: solution.iterations,
        },
        fixtures,
    })
}
