//! Squadforge - fixture-aware fantasy squad selection.
//!
//! Selects the initial 15-player squad that maximises fixture-adjusted
//! expected points over a window of gameweeks, subject to position quotas,
//! a per-club cap and a budget. Ties on points go to the cheaper squad.
//!
//! # Architecture
//!
//! A selection call runs four stages:
//!
//! 1. **Validation** of the player and fixture tables and the request.
//! 2. **Model building**: fixture difficulty scales each player's base
//!    expected points, and the pool becomes a [`selection::SquadModel`]
//!    with one binary variable per player.
//! 3. **Solving** with a [`solver::SquadSolver`]:
//!    - `HighsSolver` - exact MIP via HiGHS (`good_lp`)
//!    - `GeneticSolver` - seeded heuristic search
//! 4. **Assembly** of the [`domain::SquadResult`], re-checked against the
//!    model.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Identifiers, money, fixtures, rules, tables and results
//! - [`selection`] - The selection routine and its stages
//! - [`solver`] - Solver trait and strategies
//! - [`error`] - Error types for the crate
//! - [`cli`] - The `squadforge` command line
//!
//! # Example
//!
//! ```no_run
//! use squadforge::domain::Table;
//! use squadforge::selection::{select_initial_squad, SelectionRequest};
//! use rust_decimal_macros::dec;
//!
//! fn main() -> squadforge::error::Result<()> {
//!     let players = Table::parse("players", &std::fs::read_to_string("players.json")?)?;
//!     let fixtures = Table::parse("fixtures", &std::fs::read_to_string("fixtures.json")?)?;
//!
//!     let request = SelectionRequest::default()
//!         .with_window(5, 8)
//!         .with_budget(dec!(99.5));
//!     let result = select_initial_squad(&players, &fixtures, &request)?;
//!     println!("{} for {:.1} points", result.total_cost, result.expected_points);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod selection;
pub mod solver;
