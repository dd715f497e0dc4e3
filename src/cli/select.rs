//! `select`: load tables, run the selection, print the squad.

use std::path::Path;

use tabled::{Table as TextTable, Tabled};
use tracing::info;

use crate::cli::{output, SelectArgs};
use crate::config::Config;
use crate::domain::{ClubFixtures, ClubId, FixtureRecord, SquadResult, Table, Venue};
use crate::error::Result;
use crate::selection::select_initial_squad;

#[derive(Tabled)]
struct SquadRow {
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Club")]
    club: ClubId,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Points")]
    points: String,
}

#[derive(Tabled)]
struct FixtureRow {
    #[tabled(rename = "Club")]
    club: ClubId,
    #[tabled(rename = "Fixtures")]
    fixtures: String,
    #[tabled(rename = "Avg")]
    average: String,
    #[tabled(rename = "Total")]
    total: u32,
}

/// Config from `--config` (or defaults) with command-line overrides applied.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
pub fn load_config(args: &SelectArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(gw_start) = args.gw_start {
        config.selection.gw_start = gw_start;
    }
    if let Some(gw_end) = args.gw_end {
        config.selection.gw_end = gw_end;
    }
    if let Some(budget) = args.budget {
        config.selection.budget = budget;
    }
    if let Some(solver) = &args.solver {
        config.solver.kind.clone_from(solver);
    }
    if let Some(seed) = args.seed {
        config.solver.genetic.seed = Some(seed);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

/// Run a selection and print the result.
///
/// # Errors
///
/// Returns an error if a table cannot be read or the selection fails.
pub fn execute(args: &SelectArgs, config: &Config) -> Result<()> {
    let players = read_table("players", &args.players)?;
    let fixtures = read_table("fixtures", &args.fixtures)?;
    info!(
        players = players.len(),
        fixtures = fixtures.len(),
        "tables loaded"
    );

    let request = config.selection_request()?;
    let result = select_initial_squad(&players, &fixtures, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn read_table(name: &'static str, path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    Table::parse(name, &content)
}

fn print_result(result: &SquadResult) {
    output::section(&format!("Squad ({})", result.fixtures.window));
    let rows: Vec<SquadRow> = result
        .squad
        .iter()
        .map(|p| SquadRow {
            position: p.position.code().to_string(),
            player: p.label(),
            club: p.club,
            cost: p.cost.to_string(),
            points: format!("{:.2}", p.window_score),
        })
        .collect();
    output::table(&TextTable::new(rows).to_string());

    println!();
    output::key_value("Total cost", result.total_cost);
    output::key_value("Exp. points", format!("{:.2}", result.expected_points));
    let diagnostics = &result.diagnostics;
    output::key_value(
        "Solver",
        format!("{} ({})", diagnostics.solver, diagnostics.status),
    );
    output::key_value(
        "Solve time",
        format!("{:.1} ms", diagnostics.solve_time.as_secs_f64() * 1000.0),
    );
    if let Some(iterations) = diagnostics.iterations {
        output::key_value("Generations", iterations);
    }

    output::section("Fixtures");
    let rows: Vec<FixtureRow> = result
        .fixtures
        .clubs
        .iter()
        .map(|(club, fixtures)| fixture_row(*club, fixtures))
        .collect();
    output::table(&TextTable::new(rows).to_string());
}

fn fixture_row(club: ClubId, fixtures: &ClubFixtures) -> FixtureRow {
    FixtureRow {
        club,
        fixtures: fixtures
            .fixtures
            .iter()
            .map(describe)
            .collect::<Vec<_>>()
            .join(", "),
        average: format!("{:.2}", fixtures.average_difficulty),
        total: fixtures.total_difficulty,
    }
}

fn describe(record: &FixtureRecord) -> String {
    match (record.venue, record.opponent) {
        (Venue::Blank, _) | (_, None) => format!("GW{} -", record.gameweek),
        (venue, Some(opponent)) => format!(
            "GW{} {opponent}({venue}) {}",
            record.gameweek, record.difficulty
        ),
    }
}
