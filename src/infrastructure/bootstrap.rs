//! Composition root wiring configuration into a session.

use tracing::info;

use super::factory::ledger::build_ledger;
use super::factory::solver::{build_allocation_solver, build_valuator};
use crate::application::session::Session;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Build a session from `config`.
///
/// # Errors
///
/// Fails when a configured value cannot build its service.
pub fn build_session(config: &Config) -> Result<Session> {
    let allocation = build_allocation_solver(config)?;
    let smoother = config
        .smoothing
        .smoother()
        .map_err(|e| ConfigError::InvalidValue {
            field: "smoothing.lambda",
            reason: e.to_string(),
        })?;

    info!(
        backend = allocation.backend(),
        outcomes = allocation.alphabet().len(),
        initial_balance = %config.ledger.initial_balance,
        "Session ready"
    );

    Ok(Session::new(
        allocation.clone(),
        build_valuator(&allocation, config),
        smoother,
        build_ledger(config),
        config.solver.options(),
        config.simulation.settings(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_opens_ledger_at_initial_balance() {
        let config = Config::default();
        let session = build_session(&config).unwrap();

        assert_eq!(session.ledger.balance(), rust_decimal::Decimal::from(100));
        assert_eq!(session.options, config.solver.options());
        assert_eq!(session.simulation.iterations, 5);
    }
}
