//! Declarative linear constraints over player selection variables.
//!
//! Every rule of a squad (size, quotas, budget, club caps) and every
//! caller-supplied rule is expressed as one [`Constraint`] record:
//! `sum(coefficient[p] * x[p]) {<=, >=, =} rhs`, with `x[p]` the 0/1
//! selection variable of player `p`. Solvers consume the records without
//! knowing where they came from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PlayerId};
use super::player::Position;

/// Tolerance used when checking a constraint against a 0/1 assignment.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    #[serde(rename = "ge", alias = ">=")]
    GreaterEqual,
    /// Less than or equal (<=).
    #[serde(rename = "le", alias = "<=")]
    LessEqual,
    /// Equal (=).
    #[serde(rename = "eq", alias = "=", alias = "==")]
    Equal,
}

impl ConstraintSense {
    /// Amount by which `lhs` misses `rhs`; zero when satisfied.
    #[must_use]
    pub fn violation(self, lhs: f64, rhs: f64) -> f64 {
        let gap = match self {
            Self::GreaterEqual => rhs - lhs,
            Self::LessEqual => lhs - rhs,
            Self::Equal => (lhs - rhs).abs(),
        };
        if gap > FEASIBILITY_TOLERANCE {
            gap
        } else {
            0.0
        }
    }
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "=",
        })
    }
}

/// Where a constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    SquadSize,
    Position(Position),
    Budget,
    Club(ClubId),
    Custom,
}

/// A single linear constraint keyed by player id.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub coefficients: BTreeMap<PlayerId, f64>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl Constraint {
    /// Left-hand side under `is_selected`.
    pub fn lhs(&self, is_selected: impl Fn(PlayerId) -> bool) -> f64 {
        self.coefficients
            .iter()
            .filter(|(id, _)| is_selected(**id))
            .map(|(_, c)| *c)
            .sum()
    }
}

/// One `coefficient * x[player]` term of a custom constraint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Term {
    pub player: PlayerId,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
}

const fn default_coefficient() -> f64 {
    1.0
}

/// A caller-supplied linear constraint, merged into the squad model as-is.
///
/// ```toml
/// [[constraints]]
/// name = "at most one keeper from club 3"
/// sense = "le"
/// rhs = 1
/// terms = [{ player = 12 }, { player = 41 }]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomConstraint {
    pub name: String,
    pub terms: Vec<Term>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl CustomConstraint {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        terms: Vec<Term>,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            terms,
            sense,
            rhs,
        }
    }

    /// Force `player` into the squad.
    #[must_use]
    pub fn require(player: PlayerId) -> Self {
        Self::new(
            format!("require {player}"),
            vec![Term {
                player,
                coefficient: 1.0,
            }],
            ConstraintSense::Equal,
            1.0,
        )
    }

    /// Keep `player` out of the squad.
    #[must_use]
    pub fn exclude(player: PlayerId) -> Self {
        Self::new(
            format!("exclude {player}"),
            vec![Term {
                player,
                coefficient: 1.0,
            }],
            ConstraintSense::Equal,
            0.0,
        )
    }

    /// Select at most `limit` of `players`.
    #[must_use]
    pub fn at_most(
        name: impl Into<String>,
        players: impl IntoIterator<Item = PlayerId>,
        limit: usize,
    ) -> Self {
        let terms = players
            .into_iter()
            .map(|player| Term {
                player,
                coefficient: 1.0,
            })
            .collect();
        Self::new(name, terms, ConstraintSense::LessEqual, limit as f64)
    }

    /// Convert into a model constraint, summing repeated terms.
    #[must_use]
    pub fn to_constraint(&self) -> Constraint {
        let mut coefficients = BTreeMap::new();
        for term in &self.terms {
            *coefficients.entry(term.player).or_insert(0.0) += term.coefficient;
        }
        Constraint {
            name: self.name.clone(),
            kind: ConstraintKind::Custom,
            coefficients,
            sense: self.sense,
            rhs: self.rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_by_sense() {
        assert_eq!(ConstraintSense::LessEqual.violation(4.0, 3.0), 1.0);
        assert_eq!(ConstraintSense::LessEqual.violation(3.0, 3.0), 0.0);
        assert_eq!(ConstraintSense::GreaterEqual.violation(1.0, 3.0), 2.0);
        assert_eq!(ConstraintSense::Equal.violation(14.0, 15.0), 1.0);
        assert_eq!(ConstraintSense::Equal.violation(15.0 + 1e-9, 15.0), 0.0);
    }

    #[test]
    fn lhs_counts_selected_terms_only() {
        let constraint = CustomConstraint::at_most(
            "pair",
            [PlayerId::new(1), PlayerId::new(2)],
            1,
        )
        .to_constraint();
        assert_eq!(constraint.lhs(|id| id == PlayerId::new(2)), 1.0);
        assert_eq!(constraint.lhs(|_| true), 2.0);
        assert_eq!(constraint.kind, ConstraintKind::Custom);
    }

    #[test]
    fn repeated_terms_are_merged() {
        let custom = CustomConstraint::new(
            "dup",
            vec![
                Term {
                    player: PlayerId::new(5),
                    coefficient: 1.0,
                },
                Term {
                    player: PlayerId::new(5),
                    coefficient: 2.0,
                },
            ],
            ConstraintSense::LessEqual,
            2.0,
        );
        let constraint = custom.to_constraint();
        assert_eq!(constraint.coefficients.len(), 1);
        assert_eq!(constraint.coefficients[&PlayerId::new(5)], 3.0);
    }

    #[test]
    fn custom_constraint_from_toml() {
        let custom: CustomConstraint = toml::from_str(
            r#"
name = "no more than one"
sense = "le"
rhs = 1
terms = [{ player = 12 }, { player = 41, coefficient = 1.0 }]
"#,
        )
        .unwrap();
        assert_eq!(custom.sense, ConstraintSense::LessEqual);
        assert_eq!(custom.terms.len(), 2);
        assert_eq!(custom.terms[0].coefficient, 1.0);
    }

    #[test]
    fn require_and_exclude_are_equalities() {
        let require = CustomConstraint::require(PlayerId::new(7));
        assert_eq!(require.sense, ConstraintSense::Equal);
        assert_eq!(require.rhs, 1.0);
        let exclude = CustomConstraint::exclude(PlayerId::new(7));
        assert_eq!(exclude.rhs, 0.0);
    }
}
