//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod select;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Squadforge - fixture-aware fantasy squad selection.
#[derive(Parser, Debug)]
#[command(name = "squadforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select the best 15-player squad for a gameweek window
    Select(SelectArgs),

    /// Validate a configuration file
    CheckConfig(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    pub config: PathBuf,
}

/// Arguments for the `select` subcommand.
#[derive(Parser, Debug)]
pub struct SelectArgs {
    /// Player table (JSON array or bootstrap dump with `elements`)
    #[arg(short, long)]
    pub players: PathBuf,

    /// Fixture table (JSON array)
    #[arg(short, long)]
    pub fixtures: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override first gameweek of the window
    #[arg(long)]
    pub gw_start: Option<u32>,

    /// Override last gameweek of the window
    #[arg(long)]
    pub gw_end: Option<u32>,

    /// Override budget in £m
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// Override solver (exact, genetic)
    #[arg(long)]
    pub solver: Option<String>,

    /// Seed for the genetic solver
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the result as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}
