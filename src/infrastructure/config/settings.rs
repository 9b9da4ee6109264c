//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; missing fields take their documented defaults.
//!
//! # Example
//!
//! ```no_run
//! use hedgeline::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::cashout::CashoutConfig;
use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::simulation::SimulationConfig;
use super::smoothing::SmoothingConfig;
use super::solver::SolverConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Allocation solver settings.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Cash-out offer policy.
    #[serde(default)]
    pub cashout: CashoutConfig,

    #[serde(default)]
    pub smoothing: SmoothingConfig,

    /// Live simulation loop and odds perturbation.
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize the tracing subscriber from `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Check that values are within acceptable ranges.
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "must be \"pretty\" or \"json\""));
        }

        let solver = &self.solver;
        if solver.increment <= Decimal::ZERO {
            return Err(invalid("solver.increment", "must be greater than 0"));
        }
        if let Some(secs) = solver.time_limit_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(invalid("solver.time_limit_secs", "must be a positive number of seconds"));
            }
        }
        if solver.max_outcomes == 0 {
            return Err(invalid("solver.max_outcomes", "must be greater than 0"));
        }
        solver
            .alphabet()
            .map_err(|e| invalid("solver.alphabet", &e.to_string()))?;

        let cashout = &self.cashout;
        if cashout.offer_floor < Decimal::ZERO || cashout.offer_ceiling > Decimal::ONE {
            return Err(invalid("cashout.offer_floor", "offer bounds must lie within [0, 1]"));
        }
        if cashout.offer_floor > cashout.offer_ceiling {
            return Err(invalid("cashout.offer_ceiling", "must be >= offer_floor"));
        }
        if cashout.epsilon <= Decimal::ZERO {
            return Err(invalid("cashout.epsilon", "must be greater than 0"));
        }
        if cashout.increment <= Decimal::ZERO {
            return Err(invalid("cashout.increment", "must be greater than 0"));
        }

        self.smoothing
            .smoother()
            .map_err(|_| invalid("smoothing.lambda", "must be between 0 and 1"))?;

        let simulation = &self.simulation;
        if !(simulation.perturbation_low > 0.0
            && simulation.perturbation_low <= simulation.perturbation_high
            && simulation.perturbation_high.is_finite())
        {
            return Err(invalid(
                "simulation.perturbation_low",
                "need 0 < perturbation_low <= perturbation_high",
            ));
        }
        if simulation.odds_floor <= Decimal::ONE {
            return Err(invalid("simulation.odds_floor", "must be greater than 1"));
        }

        if self.ledger.initial_balance < Decimal::ZERO {
            return Err(invalid("ledger.initial_balance", "must be 0 or greater"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::allocation::BudgetMode;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.solver.increment, dec!(1));
        assert_eq!(config.solver.budget_mode, BudgetMode::Exact);
        assert_eq!(config.solver.max_outcomes, 59_049);
        assert_eq!(config.cashout.offer_floor, dec!(0.35));
        assert_eq!(config.smoothing.lambda, dec!(0.2));
        assert_eq!(config.ledger.initial_balance, dec!(100));
    }

    #[test]
    fn parses_sections() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [solver]
            increment = 0.5
            budget_mode = "at_most"
            time_limit_secs = 2.5

            [simulation]
            iterations = 3
            interval_ms = 10
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.solver.increment, dec!(0.5));
        assert_eq!(config.solver.budget_mode, BudgetMode::AtMost);
        assert_eq!(
            config.solver.time_limit(),
            Some(std::time::Duration::from_millis(2500))
        );
        assert_eq!(config.simulation.settings().iterations, 3);
        assert_eq!(config.simulation.perturbation().seed, Some(7));
    }

    #[test]
    fn rejects_out_of_range_values() {
        for toml in [
            "[solver]\nincrement = 0",
            "[solver]\ntime_limit_secs = -1.0",
            "[solver]\nalphabet = []",
            "[cashout]\noffer_floor = 0.9\noffer_ceiling = 0.5",
            "[smoothing]\nlambda = 1.5",
            "[simulation]\nperturbation_low = 1.2\nperturbation_high = 1.1",
            "[logging]\nformat = \"xml\"",
        ] {
            let err = Config::parse_toml(toml).unwrap_err();
            assert!(
                matches!(err, crate::error::Error::Config(ConfigError::InvalidValue { .. })),
                "{toml}: {err}"
            );
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[solver\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(ConfigError::Parse(_))));
    }
}
