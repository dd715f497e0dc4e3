//! Application configuration loading and validation.
//!
//! Every section is optional; an empty file yields the official ruleset,
//! gameweeks 1-4, a £100m budget and the exact solver.
//!
//! ```toml
//! [selection]
//! gw_start = 5
//! gw_end = 8
//! budget = 99.5
//!
//! [solver]
//! kind = "genetic"
//!
//! [solver.genetic]
//! seed = 42
//!
//! [[constraints]]
//! name = "keep 233"
//! sense = "eq"
//! rhs = 1
//! terms = [{ player = 233 }]
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::domain::{CustomConstraint, GameweekWindow, SquadRules};
use crate::error::{ConfigError, Result};
use crate::selection::SelectionRequest;
use crate::solver::{GeneticConfig, HighsConfig, SolverChoice};

/// `[selection]`: window, budget and points columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    pub gw_start: u32,
    pub gw_end: u32,
    /// Budget in £m.
    pub budget: Decimal,
    /// Explicit expected-points columns, one per gameweek.
    pub points_columns: Option<Vec<String>>,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        let window = GameweekWindow::default();
        Self {
            gw_start: window.start(),
            gw_end: window.end(),
            budget: Decimal::ONE_HUNDRED,
            points_columns: None,
        }
    }
}

/// `[solver]`: strategy name and per-strategy options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// `exact` or `genetic` (aliases accepted).
    pub kind: String,
    /// HiGHS wall-clock limit per phase.
    pub time_limit_secs: Option<f64>,
    pub genetic: GeneticConfig,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            kind: "exact".into(),
            time_limit_secs: None,
            genetic: GeneticConfig::default(),
        }
    }
}

impl SolverSettings {
    /// Resolve `kind` and attach the matching options.
    ///
    /// # Errors
    ///
    /// Unknown solver names are rejected.
    pub fn choice(&self) -> Result<SolverChoice> {
        let choice = self
            .kind
            .parse::<SolverChoice>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "solver.kind",
                reason: e.to_string(),
            })?;
        Ok(match choice {
            SolverChoice::Exact(_) => SolverChoice::Exact(HighsConfig {
                time_limit_secs: self.time_limit_secs,
            }),
            SolverChoice::Genetic(_) => SolverChoice::Genetic(self.genetic.clone()),
            custom @ SolverChoice::Custom(_) => custom,
        })
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionSettings,

    /// Squad composition rules. Defaults to the official ruleset.
    #[serde(default)]
    pub rules: SquadRules,

    #[serde(default)]
    pub solver: SolverSettings,

    /// Extra linear constraints appended to the model.
    #[serde(default)]
    pub constraints: Vec<CustomConstraint>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Build a selection request from these settings.
    ///
    /// # Errors
    ///
    /// Fails only for an unknown solver kind, which validation rejects.
    pub fn selection_request(&self) -> Result<SelectionRequest> {
        Ok(SelectionRequest {
            gw_start: self.selection.gw_start,
            gw_end: self.selection.gw_end,
            budget: self.selection.budget,
            solver: self.solver.choice()?,
            points_columns: self.selection.points_columns.clone(),
            custom_constraints: self.constraints.clone(),
            rules: self.rules,
        })
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let selection = &self.selection;
        if let Err(e) = GameweekWindow::new(selection.gw_start, selection.gw_end) {
            return Err(ConfigError::InvalidValue {
                field: "selection.gw_start",
                reason: e.to_string(),
            }
            .into());
        }
        if selection.budget <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "selection.budget",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some(columns) = &selection.points_columns {
            let expected = (selection.gw_end - selection.gw_start + 1) as usize;
            if columns.len() != expected {
                return Err(ConfigError::InvalidValue {
                    field: "selection.points_columns",
                    reason: format!("expected {expected} columns, got {}", columns.len()),
                }
                .into());
            }
        }

        if let Err(e) = self.rules.validate() {
            return Err(ConfigError::InvalidValue {
                field: "rules",
                reason: e.to_string(),
            }
            .into());
        }

        self.solver.choice()?;
        if let Some(limit) = self.solver.time_limit_secs {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "solver.time_limit_secs",
                    reason: "must be a positive number of seconds".to_string(),
                }
                .into());
            }
        }
        if let Err(e) = self.solver.genetic.validate() {
            return Err(ConfigError::InvalidValue {
                field: "solver.genetic",
                reason: e.to_string(),
            }
            .into());
        }

        for constraint in &self.constraints {
            if constraint.name.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "constraints.name",
                }
                .into());
            }
            if constraint.terms.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "constraints.terms",
                    reason: format!("constraint '{}' has no terms", constraint.name),
                }
                .into());
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of {:?}", LoggingConfig::FORMATS),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.selection.gw_start, 1);
        assert_eq!(config.selection.gw_end, 4);
        assert_eq!(config.selection.budget, dec!(100));
        assert_eq!(config.rules, SquadRules::official());
        assert!(matches!(
            config.solver.choice().unwrap(),
            SolverChoice::Exact(_)
        ));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn genetic_options_flow_into_choice() {
        let config = Config::parse_toml(
            r#"
            [solver]
            kind = "ga"

            [solver.genetic]
            population_size = 50
            seed = 9
            "#,
        )
        .unwrap();
        match config.solver.choice().unwrap() {
            SolverChoice::Genetic(genetic) => {
                assert_eq!(genetic.population_size, 50);
                assert_eq!(genetic.seed, Some(9));
                assert_eq!(genetic.generations, GeneticConfig::default().generations);
            }
            other => panic!("expected genetic, got {other:?}"),
        }
    }

    #[test]
    fn exact_time_limit_flows_into_choice() {
        let config = Config::parse_toml("[solver]\ntime_limit_secs = 2.5\n").unwrap();
        match config.selection_request().unwrap().solver {
            SolverChoice::Exact(highs) => assert_eq!(highs.time_limit_secs, Some(2.5)),
            other => panic!("expected exact, got {other:?}"),
        }
    }

    #[test]
    fn unknown_solver_rejected() {
        let err = Config::parse_toml("[solver]\nkind = \"annealing\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "solver.kind", .. })
        ));
    }

    #[test]
    fn window_out_of_season_rejected() {
        let err = Config::parse_toml("[selection]\ngw_start = 36\ngw_end = 40\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "selection.gw_start", .. })
        ));
    }

    #[test]
    fn custom_constraints_parse() {
        let config = Config::parse_toml(
            r#"
            [[constraints]]
            name = "no more than one of"
            sense = "le"
            rhs = 1
            terms = [{ player = 10 }, { player = 11, coefficient = 1.0 }]
            "#,
        )
        .unwrap();
        let request = config.selection_request().unwrap();
        assert_eq!(request.custom_constraints.len(), 1);
        assert_eq!(request.custom_constraints[0].terms.len(), 2);
    }

    #[test]
    fn unknown_log_format_rejected() {
        let err = Config::parse_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "logging.format", .. })
        ));
    }
}
