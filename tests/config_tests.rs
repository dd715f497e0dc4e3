mod support;

use rust_decimal_macros::dec;
use squadforge::config::Config;
use squadforge::domain::PlayerId;
use squadforge::error::{ConfigError, Error};
use squadforge::selection::select_initial_squad;
use squadforge::solver::SolverChoice;
use tempfile::TempDir;

use support::pool::{no_fixtures, players_table, small_pool};
use support::write_file;

#[test]
fn config_file_drives_a_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "squadforge.toml",
        r#"
[selection]
gw_start = 1
gw_end = 1
budget = 100.0

[solver]
kind = "exact"
time_limit_secs = 30

[[constraints]]
name = "bench keeper"
sense = "eq"
rhs = 1
terms = [{ player = 3 }]

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.selection.budget, dec!(100.0));
    assert_eq!(config.logging.format, "json");

    let request = config.selection_request().unwrap();
    assert!(matches!(request.solver, SolverChoice::Exact(_)));
    let result = select_initial_squad(&players_table(small_pool()), &no_fixtures(), &request)
        .unwrap();
    assert!(result.contains(PlayerId::new(3)));
}

#[test]
fn config_rejects_non_positive_budget() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.toml", "[selection]\nbudget = 0\n");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "selection.budget",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid budget error, got {err}"),
        Ok(config) => panic!(
            "Expected zero budget to be rejected, got {}",
            config.selection.budget
        ),
    }
}

#[test]
fn config_rejects_quotas_larger_than_squad() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "rules.toml",
        "[rules]\nsquad_size = 11\n",
    );

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field: "rules", reason })) => {
            assert!(reason.contains("15"), "reason was {reason}");
        }
        other => panic!("Expected rules error, got {other:?}"),
    }
}

#[test]
fn config_rejects_bad_genetic_parameters() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ga.toml",
        "[solver]\nkind = \"genetic\"\n\n[solver.genetic]\ncrossover_rate = 2.0\n",
    );
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "solver.genetic",
            ..
        }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.toml", "[selection\nbudget = ");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
