//! Fixture-adjusted window scores.

use super::validate::PlayerRow;
use super::weighting::FixtureWeights;
use crate::domain::{ClubId, Player};

/// Per-gameweek adjusted points and their sum.
///
/// `base_points[i]` belongs to the i-th gameweek of the window. Negative
/// projections pass through unchanged.
#[must_use]
pub fn window_score(base_points: &[f64], club: ClubId, weights: &FixtureWeights) -> (Vec<f64>, f64) {
    let adjusted: Vec<f64> = base_points
        .iter()
        .zip(weights.window().gameweeks())
        .map(|(points, gw)| points * weights.multiplier(club, gw))
        .collect();
    let total = adjusted.iter().sum();
    (adjusted, total)
}

pub(crate) fn score_players(rows: Vec<PlayerRow>, weights: &FixtureWeights) -> Vec<Player> {
    rows.into_iter()
        .map(|row| {
            let (adjusted_points, window_score) = window_score(&row.base_points, row.club, weights);
            Player {
                id: row.id,
                name: row.name,
                position: row.position,
                club: row.club,
                cost: row.cost,
                base_points: row.base_points,
                adjusted_points,
                window_score,
            }
        })
        .collect()
}
