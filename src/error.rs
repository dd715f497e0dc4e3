use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Cost, PlayerId, Position};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Input tables that do not match the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{table} table is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },

    #[error("duplicate player ids: {}", join_ids(.ids))]
    DuplicateIds { ids: Vec<PlayerId> },

    #[error("invalid value in {table}.{column} at row {row}: {reason}")]
    InvalidValue {
        table: &'static str,
        column: String,
        row: usize,
        reason: String,
    },

    #[error("{table} table is not a list of records: {reason}")]
    NotATable { table: &'static str, reason: String },
}

/// Caller-supplied parameters that cannot describe a valid selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("invalid gameweek range {start}..={end} (must satisfy 1 <= start <= end <= 38)")]
    InvalidGameweekRange { start: u32, end: u32 },

    #[error("budget must be positive, got {budget}")]
    NonPositiveBudget { budget: Decimal },

    #[error("position quotas sum to {total} but the squad holds {squad_size}")]
    QuotasExceedSquadSize { total: usize, squad_size: usize },

    #[error("expected {expected} points columns for the gameweek window, got {got}")]
    PointsColumnCount { expected: usize, got: usize },

    #[error("constraint '{constraint}' references unknown player {player}")]
    UnknownPlayer { constraint: String, player: PlayerId },

    #[error("unknown solver '{0}' (expected exact or genetic)")]
    UnknownSolver(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Constraint class suspected of making a selection impossible.
///
/// Only produced from necessary conditions that provably fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Suspect {
    QuotaShortfall { quotas: usize, squad_size: usize },
    PositionSupply {
        position: Position,
        required: usize,
        available: usize,
    },
    ClubLimit {
        position: Position,
        required: usize,
        reachable: usize,
    },
    ClubCapacity {
        clubs: usize,
        max_per_club: usize,
        squad_size: usize,
    },
    Budget { minimum_cost: Cost, budget: Cost },
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotaShortfall { quotas, squad_size } => write!(
                f,
                "position quotas ({quotas}) cannot fill a squad of {squad_size}"
            ),
            Self::PositionSupply {
                position,
                required,
                available,
            } => write!(
                f,
                "{position}: need {required}, only {available} in the pool"
            ),
            Self::ClubLimit {
                position,
                required,
                reachable,
            } => write!(
                f,
                "{position}: need {required}, club limit leaves {reachable} selectable"
            ),
            Self::ClubCapacity {
                clubs,
                max_per_club,
                squad_size,
            } => write!(
                f,
                "{clubs} clubs x {max_per_club} per club cannot fill a squad of {squad_size}"
            ),
            Self::Budget {
                minimum_cost,
                budget,
            } => write!(
                f,
                "budget: cheapest legal squad costs {minimum_cost}, limit is {budget}"
            ),
        }
    }
}

/// No squad satisfies every hard constraint.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}{}", headline(.solver, .proven), suspect_suffix(.suspect))]
pub struct InfeasibleError {
    /// Solver that attempted the selection.
    pub solver: String,
    /// True when the solver proved infeasibility rather than giving up.
    pub proven: bool,
    pub suspect: Option<Suspect>,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),

    /// A solver returned a selection that fails the model on re-check.
    #[error("solver '{solver}' returned an inconsistent squad: {}", .violations.join("; "))]
    Consistency {
        solver: String,
        violations: Vec<String>,
    },

    #[error("solver error: {0}")]
    Solver(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_ids(ids: &[PlayerId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn headline(solver: &str, proven: &bool) -> String {
    if *proven {
        format!("no feasible squad exists ({solver})")
    } else {
        format!("no feasible squad found by {solver}")
    }
}

fn suspect_suffix(suspect: &Option<Suspect>) -> String {
    suspect
        .as_ref()
        .map(|s| format!("; suspected: {s}"))
        .unwrap_or_default()
}
