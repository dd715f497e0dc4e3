//! Selection vectors and the assembled squad.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::fixture::{FixtureRecord, GameweekWindow};
use super::ids::{ClubId, PlayerId};
use super::money::Cost;
use super::player::{Player, Position};

/// Chosen/not-chosen flag per model player, in model order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection(Vec<bool>);

impl Selection {
    /// Nothing selected among `len` players.
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self(vec![false; len])
    }

    #[must_use]
    pub fn from_mask(mask: Vec<bool>) -> Self {
        Self(mask)
    }

    /// Select the given model indices among `len` players.
    #[must_use]
    pub fn from_indices(len: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut mask = vec![false; len];
        for i in indices {
            if let Some(slot) = mask.get_mut(i) {
                *slot = true;
            }
        }
        Self(mask)
    }

    #[must_use]
    pub fn mask(&self) -> &[bool] {
        &self.0
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Indices of selected players.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, chosen)| **chosen)
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|chosen| **chosen).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible, optimality not proven.
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// Search budget exhausted without a feasible candidate.
    NotFound,
}

impl SolutionStatus {
    #[must_use]
    pub const fn has_selection(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "optimal",
            Self::Feasible => "feasible",
            Self::Infeasible => "infeasible",
            Self::NotFound => "not found",
        })
    }
}

/// How the squad was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverDiagnostics {
    pub solver: String,
    pub status: SolutionStatus,
    pub objective_value: f64,
    pub solve_time: Duration,
    /// Generations run, for solvers that count them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
}

/// Upcoming fixtures of one club in the squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubFixtures {
    pub fixtures: Vec<FixtureRecord>,
    pub average_difficulty: f64,
    pub total_difficulty: u32,
}

/// Fixture outlook for every club represented in the squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureSummary {
    pub window: GameweekWindow,
    pub clubs: BTreeMap<ClubId, ClubFixtures>,
}

/// A selected squad with totals and breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadResult {
    /// Selected players, by position then descending window score.
    pub squad: Vec<Player>,
    pub total_cost: Cost,
    /// Sum of the selected players' window scores.
    pub expected_points: f64,
    pub per_position: BTreeMap<Position, Vec<PlayerId>>,
    pub club_counts: BTreeMap<ClubId, usize>,
    pub diagnostics: SolverDiagnostics,
    pub fixtures: FixtureSummary,
}

impl SquadResult {
    /// Players at `position`.
    pub fn players_at(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.squad.iter().filter(move |p| p.position == position)
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.squad.iter().any(|p| p.id == id)
    }
}
