//! Configuration loading from disk.

use std::io::Write;

use hedgeline::application::allocation::BudgetMode;
use hedgeline::error::{ConfigError, Error};
use hedgeline::infrastructure::bootstrap::build_session;
use hedgeline::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_a_full_config_file() {
    let file = write_config(
        r#"
        [logging]
        level = "warn"

        [solver]
        increment = 0.5
        budget_mode = "exact_strict"
        max_outcomes = 729

        [cashout]
        offer_floor = 0.4
        offer_ceiling = 0.9

        [smoothing]
        lambda = 0.3

        [ledger]
        initial_balance = 250
        "#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.solver.increment, dec!(0.5));
    assert_eq!(config.solver.budget_mode, BudgetMode::ExactStrict);
    assert_eq!(config.solver.max_outcomes, 729);
    assert_eq!(config.cashout.offer_floor, dec!(0.4));
    assert_eq!(config.smoothing.lambda, dec!(0.3));
    assert_eq!(config.ledger.initial_balance, dec!(250));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.solver.increment, dec!(1));
    assert_eq!(config.ledger.initial_balance, dec!(100));
}

#[test]
fn missing_file_is_an_error_for_strict_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let file = write_config("[smoothing]\nlambda = 2.0\n");
    let err = Config::load_or_default(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue { field: "smoothing.lambda", .. })
    ));
}

#[test]
fn session_is_built_from_config() {
    let file = write_config(
        r#"
        [solver]
        increment = 0.5

        [ledger]
        initial_balance = 40
        "#,
    );
    let config = Config::load(file.path()).unwrap();
    let session = build_session(&config).unwrap();

    assert_eq!(session.options.increment, dec!(0.5));
    assert_eq!(session.ledger.balance(), dec!(40));
    assert_eq!(session.allocation.backend(), "highs");
}

#[test]
fn example_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
    let config = Config::load(path).unwrap();

    assert_eq!(config.solver.max_outcomes, 59_049);
    assert_eq!(config.cashout.offer_ceiling, dec!(0.95));
    assert_eq!(config.simulation.settings().iterations, 5);
}
