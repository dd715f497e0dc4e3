//! Input validation and row parsing, run before any model is built.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::SelectionRequest;
use crate::domain::{ClubId, Cost, Difficulty, Fixture, GameweekWindow, PlayerId, Position, Table};
use crate::error::{ParameterError, Result, SchemaError};

/// Columns every player table must carry.
pub const PLAYER_COLUMNS: [&str; 4] = ["id", "element_type", "team", "now_cost"];

/// Columns a non-empty fixture table must carry.
pub const FIXTURE_COLUMNS: [&str; 5] = [
    "event",
    "team_h",
    "team_a",
    "team_h_difficulty",
    "team_a_difficulty",
];

/// Pools above this size still solve but log a warning.
const LARGE_POOL: usize = 1000;

/// A parsed player row before fixture weighting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlayerRow {
    pub id: PlayerId,
    pub name: Option<String>,
    pub position: Position,
    pub club: ClubId,
    pub cost: Cost,
    pub base_points: Vec<f64>,
}

/// Everything the building stage needs, already checked.
#[derive(Debug)]
pub(crate) struct ValidatedInput {
    pub window: GameweekWindow,
    pub budget: Cost,
    pub players: Vec<PlayerRow>,
    pub fixtures: Vec<Fixture>,
}

pub(crate) fn validate(
    players: &Table,
    fixtures: &Table,
    request: &SelectionRequest,
) -> Result<ValidatedInput> {
    players.require_columns(&PLAYER_COLUMNS)?;
    check_unique_ids(players)?;

    if players.len() > LARGE_POOL {
        warn!(
            players = players.len(),
            "player pool exceeds {LARGE_POOL} rows, solving may be slow"
        );
    }

    let window = GameweekWindow::new(request.gw_start, request.gw_end)?;
    let budget = budget_units(request.budget)?;
    request.rules.validate()?;

    let points_columns = match &request.points_columns {
        Some(columns) => {
            if columns.len() != window.len() {
                return Err(ParameterError::PointsColumnCount {
                    expected: window.len(),
                    got: columns.len(),
                }
                .into());
            }
            columns.clone()
        }
        None => window.default_points_columns(),
    };
    players.require_columns(&points_columns)?;

    let rows = (0..players.len())
        .map(|row| parse_player(players, row, &points_columns))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let fixtures = parse_fixtures(fixtures)?;

    debug!(
        players = rows.len(),
        fixtures = fixtures.len(),
        %window,
        %budget,
        "inputs validated"
    );

    Ok(ValidatedInput {
        window,
        budget,
        players: rows,
        fixtures,
    })
}

fn budget_units(budget: Decimal) -> std::result::Result<Cost, ParameterError> {
    if budget <= Decimal::ZERO {
        return Err(ParameterError::NonPositiveBudget { budget });
    }
    match Cost::from_millions(budget) {
        Some(cost) if cost > Cost::ZERO => Ok(cost),
        _ => Err(ParameterError::InvalidValue {
            field: "budget".into(),
            reason: format!("{budget} does not convert to a positive number of tenths"),
        }),
    }
}

fn check_unique_ids(players: &Table) -> std::result::Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for row in 0..players.len() {
        let id = PlayerId::new(players.int(row, "id")?);
        if !seen.insert(id) {
            duplicates.insert(id);
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::DuplicateIds {
            ids: duplicates.into_iter().collect(),
        })
    }
}

fn parse_player(
    players: &Table,
    row: usize,
    points_columns: &[String],
) -> std::result::Result<PlayerRow, SchemaError> {
    let position = match players.cell(row, "element_type") {
        Some(serde_json::Value::String(code)) => code.parse::<Position>().ok(),
        Some(_) => Position::from_element_type(players.int(row, "element_type")?),
        None => None,
    }
    .ok_or_else(|| {
        players.invalid(
            row,
            "element_type",
            "expected 1-4 or GK/DEF/MID/FWD".into(),
        )
    })?;

    let cost = players.int(row, "now_cost")?;
    if cost < 0 {
        return Err(players.invalid(row, "now_cost", format!("negative cost {cost}")));
    }

    let base_points = points_columns
        .iter()
        .map(|column| players.float(row, column))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(PlayerRow {
        id: PlayerId::new(players.int(row, "id")?),
        name: players.text(row, "web_name").ok(),
        position,
        club: ClubId::new(players.int(row, "team")?),
        cost: Cost::from_tenths(cost),
        base_points,
    })
}

/// Parse fixture rows. Rows without a gameweek (unscheduled) are skipped.
pub(crate) fn parse_fixtures(fixtures: &Table) -> std::result::Result<Vec<Fixture>, SchemaError> {
    if fixtures.is_empty() {
        return Ok(Vec::new());
    }
    fixtures.require_columns(&FIXTURE_COLUMNS)?;

    let mut parsed = Vec::with_capacity(fixtures.len());
    let mut unscheduled = 0usize;
    for row in 0..fixtures.len() {
        if fixtures.cell(row, "event").is_none() {
            unscheduled += 1;
            continue;
        }
        let gameweek = fixtures.int(row, "event")?;
        let gameweek = u32::try_from(gameweek)
            .map_err(|_| fixtures.invalid(row, "event", format!("invalid gameweek {gameweek}")))?;
        parsed.push(Fixture {
            gameweek,
            home: ClubId::new(fixtures.int(row, "team_h")?),
            away: ClubId::new(fixtures.int(row, "team_a")?),
            home_difficulty: difficulty(fixtures, row, "team_h_difficulty")?,
            away_difficulty: difficulty(fixtures, row, "team_a_difficulty")?,
        });
    }
    if unscheduled > 0 {
        debug!(unscheduled, "skipped fixtures without a gameweek");
    }
    Ok(parsed)
}

fn difficulty(
    fixtures: &Table,
    row: usize,
    column: &str,
) -> std::result::Result<Difficulty, SchemaError> {
    let value = fixtures.int(row, column)?;
    u8::try_from(value)
        .ok()
        .and_then(Difficulty::new)
        .ok_or_else(|| fixtures.invalid(row, column, format!("difficulty {value} outside 1-5")))
}
