//! `check-config`: validate a configuration file without selecting.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;
use crate::solver::SolverChoice;

/// Load and validate `config_path`, then print a summary.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    let selection = &config.selection;
    let rules = &config.rules;
    output::section("Summary");
    output::key_value(
        "Window",
        format!("GW{}-{}", selection.gw_start, selection.gw_end),
    );
    output::key_value("Budget", format!("£{}m", selection.budget));
    output::key_value(
        "Squad",
        format!(
            "{} ({}-{}-{}-{}), max {} per club",
            rules.squad_size,
            rules.goalkeepers,
            rules.defenders,
            rules.midfielders,
            rules.forwards,
            rules.max_per_club
        ),
    );
    output::key_value("Solver", &config.solver.kind);
    output::key_value("Constraints", config.constraints.len());
    output::key_value(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    if matches!(config.solver.choice()?, SolverChoice::Genetic(ref g) if g.seed.is_none()) {
        output::warn("Genetic solver has no seed; results will vary between runs");
    }

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}
