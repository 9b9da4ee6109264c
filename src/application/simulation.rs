//! Live simulation: place a position, then repeatedly drift odds and cash out.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::allocation::{AllocationSolver, SolveOptions};
use super::cashout::CashoutValuator;
use crate::domain::allocation::Allocation;
use crate::domain::bet::Bet;
use crate::domain::ledger::LedgerAction;
use crate::error::Result;
use crate::port::outbound::ledger::Ledger;

/// Loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    pub iterations: usize,
    /// Pause between rounds.
    pub interval: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            iterations: 5,
            interval: Duration::from_secs(1),
        }
    }
}

/// Balance trajectory of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub final_bankroll: Decimal,
    /// Balance after placement, then after each completed round.
    pub history: Vec<Decimal>,
    pub rounds: usize,
    pub cancelled: bool,
    pub remaining_stakes: Allocation,
}

/// Drives the allocation and cash-out services against a ledger.
pub struct Simulation {
    allocation: AllocationSolver,
    valuator: CashoutValuator,
    ledger: Arc<dyn Ledger>,
    settings: SimulationSettings,
}

impl Simulation {
    #[must_use]
    pub fn new(
        allocation: AllocationSolver,
        valuator: CashoutValuator,
        ledger: Arc<dyn Ledger>,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            allocation,
            valuator,
            ledger,
            settings,
        }
    }

    /// Allocate `stake` over `bets`, debit it, then run the cash-out rounds.
    ///
    /// Shutdown is observed between rounds only. A round that has started
    /// always finishes its valuation and ledger append.
    ///
    /// # Errors
    ///
    /// Fails if the initial allocation cannot be solved or the ledger rejects
    /// an append.
    pub async fn run(
        &self,
        bets: &[Bet],
        stake: Decimal,
        events: Option<usize>,
        options: &SolveOptions,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<SimulationReport> {
        let solution = self.allocation.solve(bets, stake, events, options)?;
        self.ledger.apply(
            -solution.total_stakes,
            LedgerAction::PlaceBets,
            "initial placement",
        )?;
        info!(
            stake = %solution.total_stakes,
            guaranteed_net = %solution.guaranteed_net,
            "Position placed"
        );

        let mut stakes = solution.stakes;
        let mut history = vec![self.ledger.balance()];
        let mut rounds = 0;
        let mut cancelled = false;

        for round in 1..=self.settings.iterations {
            if *shutdown.borrow() {
                cancelled = true;
                break;
            }

            let report = self
                .valuator
                .value(&stakes, bets, None, false, Some(self.ledger.as_ref()))?;
            stakes = report.remaining_stakes;
            let balance = self.ledger.balance();
            history.push(balance);
            rounds = round;
            info!(
                round,
                cashout = %report.total_cashout,
                bankroll = %balance,
                "Simulation round complete"
            );

            if stakes.total().is_zero() {
                info!("Every bet cashed out");
                break;
            }
            if round == self.settings.iterations {
                break;
            }

            tokio::select! {
                () = tokio::time::sleep(self.settings.interval) => {}
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                cancelled = true;
                                break;
                            }
                        }
                        Err(_) => {
                            warn!("Shutdown channel closed");
                            cancelled = true;
                            break;
                        }
                    }
                }
            }
        }

        let final_bankroll = self.ledger.balance();
        info!(rounds, cancelled, final_bankroll = %final_bankroll, "Simulation finished");

        Ok(SimulationReport {
            final_bankroll,
            history,
            rounds,
            cancelled,
            remaining_stakes: stakes,
        })
    }
}
