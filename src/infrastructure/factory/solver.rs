//! Solver factory.
//!
//! Builds the allocation kernel, the odds source and the cash-out valuator
//! from configuration.

use std::sync::Arc;

use crate::adapter::outbound::odds::perturbed::PerturbedOdds;
use crate::adapter::outbound::solver::highs::HiGHSSolver;
use crate::application::allocation::AllocationSolver;
use crate::application::cashout::{CashoutPolicy, CashoutValuator};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::odds::OddsSource;
use crate::port::outbound::solver::Solver;

/// Build the ILP backend.
#[must_use]
pub fn build_backend() -> Arc<dyn Solver> {
    Arc::new(HiGHSSolver::new())
}

/// Build the allocation kernel from `[solver]`.
///
/// # Errors
///
/// Fails when the configured outcome alphabet is invalid.
pub fn build_allocation_solver(config: &Config) -> Result<AllocationSolver> {
    let alphabet = config
        .solver
        .alphabet()
        .map_err(|e| ConfigError::InvalidValue {
            field: "solver.alphabet",
            reason: e.to_string(),
        })?;
    Ok(AllocationSolver::new(build_backend())
        .with_alphabet(alphabet)
        .with_max_outcomes(config.solver.max_outcomes))
}

/// Build the odds source used when callers supply no updated odds.
#[must_use]
pub fn build_odds_source(config: &Config) -> Arc<dyn OddsSource> {
    Arc::new(PerturbedOdds::new(config.simulation.perturbation()))
}

/// Build the cash-out valuator from `[cashout]` and `[simulation]`.
#[must_use]
pub fn build_valuator(allocation: &AllocationSolver, config: &Config) -> CashoutValuator {
    CashoutValuator::new(
        allocation.clone(),
        build_odds_source(config),
        CashoutPolicy::from(&config.cashout),
    )
}
