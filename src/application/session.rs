//! One session's services.
//!
//! A session shares one allocation kernel and one ledger across every
//! service. Callers hold the session explicitly; there is no global
//! bankroll.

use std::sync::Arc;

use super::allocation::{AllocationSolver, SolveOptions};
use super::cashout::CashoutValuator;
use super::recalibration::Recalibrator;
use super::settlement::SettlementHedger;
use super::simulation::{Simulation, SimulationSettings};
use super::smoothing::Smoother;
use crate::port::outbound::ledger::Ledger;

/// Services sharing a kernel and a ledger.
#[derive(Clone)]
pub struct Session {
    pub allocation: AllocationSolver,
    pub recalibrator: Recalibrator,
    pub settlement: SettlementHedger,
    pub valuator: CashoutValuator,
    pub smoother: Smoother,
    pub ledger: Arc<dyn Ledger>,
    /// Default solve options, overridable per request.
    pub options: SolveOptions,
    /// Default simulation timing.
    pub simulation: SimulationSettings,
}

impl Session {
    /// Wire the services around `allocation` and `ledger`.
    #[must_use]
    pub fn new(
        allocation: AllocationSolver,
        valuator: CashoutValuator,
        smoother: Smoother,
        ledger: Arc<dyn Ledger>,
        options: SolveOptions,
        simulation: SimulationSettings,
    ) -> Self {
        Self {
            recalibrator: Recalibrator::new(allocation.clone()),
            settlement: SettlementHedger::new(allocation.clone()),
            allocation,
            valuator,
            smoother,
            ledger,
            options,
            simulation,
        }
    }

    /// A simulation over this session's ledger.
    #[must_use]
    pub fn simulation(&self, settings: SimulationSettings) -> Simulation {
        Simulation::new(
            self.allocation.clone(),
            self.valuator.clone(),
            Arc::clone(&self.ledger),
            settings,
        )
    }
}
