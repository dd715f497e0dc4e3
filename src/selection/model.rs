//! The squad integer program as a declarative constraint set.
//!
//! One binary variable per player, in pool order. The objective is
//! lexicographic: maximise total window score, then minimise total cost.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::domain::{
    ClubId, Constraint, ConstraintKind, ConstraintSense, Cost, CustomConstraint, Player, PlayerId,
    Position, Selection, SquadRules,
};
use crate::error::{ParameterError, Result, SchemaError};

/// A constraint not met by a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub constraint: String,
    pub kind: ConstraintKind,
    pub lhs: f64,
    pub sense: ConstraintSense,
    pub rhs: f64,
    /// How far the left-hand side misses the bound.
    pub amount: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {} violated",
            self.constraint, self.lhs, self.sense, self.rhs
        )
    }
}

/// Player pool plus every constraint a squad must satisfy.
#[derive(Debug, Clone)]
pub struct SquadModel {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
    constraints: Vec<Constraint>,
    rules: SquadRules,
    budget: Cost,
}

impl SquadModel {
    /// Build the model for `players` under `rules` and `budget`, then append
    /// `custom` constraints unchanged.
    ///
    /// # Errors
    ///
    /// Duplicate player ids are a schema error. Custom constraints naming
    /// unknown players, with no terms, or with non-finite numbers are
    /// parameter errors.
    pub fn build(
        players: Vec<Player>,
        rules: SquadRules,
        budget: Cost,
        custom: &[CustomConstraint],
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(players.len());
        let mut duplicates = BTreeSet::new();
        for (i, player) in players.iter().enumerate() {
            if index.insert(player.id, i).is_some() {
                duplicates.insert(player.id);
            }
        }
        if !duplicates.is_empty() {
            return Err(SchemaError::DuplicateIds {
                ids: duplicates.into_iter().collect(),
            }
            .into());
        }

        let mut constraints = Vec::new();

        constraints.push(Constraint {
            name: "squad size".into(),
            kind: ConstraintKind::SquadSize,
            coefficients: players.iter().map(|p| (p.id, 1.0)).collect(),
            sense: ConstraintSense::Equal,
            rhs: rules.squad_size as f64,
        });

        for position in Position::ALL {
            constraints.push(Constraint {
                name: format!("{position} quota"),
                kind: ConstraintKind::Position(position),
                coefficients: players
                    .iter()
                    .filter(|p| p.position == position)
                    .map(|p| (p.id, 1.0))
                    .collect(),
                sense: ConstraintSense::Equal,
                rhs: rules.quota(position) as f64,
            });
        }

        constraints.push(Constraint {
            name: "budget".into(),
            kind: ConstraintKind::Budget,
            coefficients: players
                .iter()
                .map(|p| (p.id, p.cost.tenths() as f64))
                .collect(),
            sense: ConstraintSense::LessEqual,
            rhs: budget.tenths() as f64,
        });

        let clubs: BTreeSet<ClubId> = players.iter().map(|p| p.club).collect();
        for club in clubs {
            constraints.push(Constraint {
                name: format!("club {club} limit"),
                kind: ConstraintKind::Club(club),
                coefficients: players
                    .iter()
                    .filter(|p| p.club == club)
                    .map(|p| (p.id, 1.0))
                    .collect(),
                sense: ConstraintSense::LessEqual,
                rhs: rules.max_per_club as f64,
            });
        }

        for extra in custom {
            check_custom(extra, &index)?;
            constraints.push(extra.to_constraint());
        }

        Ok(Self {
            players,
            index,
            constraints,
            rules,
            budget,
        })
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub const fn rules(&self) -> &SquadRules {
        &self.rules
    }

    #[must_use]
    pub const fn budget(&self) -> Cost {
        self.budget
    }

    /// Number of decision variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Variable index of `id`.
    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Constraint terms resolved to variable indices.
    pub fn terms<'a>(
        &'a self,
        constraint: &'a Constraint,
    ) -> impl Iterator<Item = (usize, f64)> + 'a {
        constraint
            .coefficients
            .iter()
            .filter_map(|(id, c)| self.index_of(*id).map(|i| (i, *c)))
    }

    /// Primary objective coefficients (window scores), in variable order.
    #[must_use]
    pub fn points(&self) -> Vec<f64> {
        self.players.iter().map(|p| p.window_score).collect()
    }

    /// Tie-break objective coefficients (costs in tenths), in variable order.
    #[must_use]
    pub fn costs(&self) -> Vec<f64> {
        self.players.iter().map(|p| p.cost.tenths() as f64).collect()
    }

    /// Total window score of a selection.
    #[must_use]
    pub fn objective(&self, selection: &Selection) -> f64 {
        selection
            .indices()
            .filter_map(|i| self.players.get(i))
            .map(|p| p.window_score)
            .sum()
    }

    /// Total cost of a selection.
    #[must_use]
    pub fn cost(&self, selection: &Selection) -> Cost {
        selection
            .indices()
            .filter_map(|i| self.players.get(i))
            .map(|p| p.cost)
            .sum()
    }

    /// Constraints `selection` fails, in model order.
    #[must_use]
    pub fn violations(&self, selection: &Selection) -> Vec<Violation> {
        self.constraints
            .iter()
            .filter_map(|c| {
                let lhs = c.lhs(|id| {
                    self.index_of(id)
                        .is_some_and(|i| selection.is_selected(i))
                });
                let amount = c.sense.violation(lhs, c.rhs);
                (amount > 0.0).then(|| Violation {
                    constraint: c.name.clone(),
                    kind: c.kind,
                    lhs,
                    sense: c.sense,
                    rhs: c.rhs,
                    amount,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn is_feasible(&self, selection: &Selection) -> bool {
        selection.len() == self.len() && self.violations(selection).is_empty()
    }
}

fn check_custom(custom: &CustomConstraint, index: &HashMap<PlayerId, usize>) -> Result<()> {
    if custom.terms.is_empty() {
        return Err(ParameterError::InvalidValue {
            field: format!("constraint '{}'", custom.name),
            reason: "has no terms".into(),
        }
        .into());
    }
    if !custom.rhs.is_finite() || custom.terms.iter().any(|t| !t.coefficient.is_finite()) {
        return Err(ParameterError::InvalidValue {
            field: format!("constraint '{}'", custom.name),
            reason: "coefficients and bound must be finite".into(),
        }
        .into());
    }
    if let Some(term) = custom.terms.iter().find(|t| !index.contains_key(&t.player)) {
        return Err(ParameterError::UnknownPlayer {
            constraint: custom.name.clone(),
            player: term.player,
        }
        .into());
    }
    Ok(())
}
