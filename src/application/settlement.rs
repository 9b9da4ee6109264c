//! Post-result settlement and re-hedging of the open remainder.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::allocation::{AllocationSolver, SolveOptions, SolveResult};
use crate::domain::allocation::Allocation;
use crate::domain::bet::Bet;
use crate::domain::id::{BetId, OutcomeLabel};
use crate::domain::ledger::LedgerAction;
use crate::error::Result;
use crate::port::outbound::ledger::Ledger;

/// Final results keyed by event index.
pub type FinishedResults = BTreeMap<usize, OutcomeLabel>;

/// Outcome of a settlement call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum Settlement {
    /// Every bet's event has finished.
    AllSettled {
        realized: Decimal,
        bankroll_after: Decimal,
    },
    /// Some bets remain open; a fresh allocation over them is attached.
    HedgeSuggested {
        realized: Decimal,
        bankroll_after: Decimal,
        open_bets: Vec<BetId>,
        #[serde(serialize_with = "super::allocation::serialize_solve_result")]
        remaining_solution: SolveResult,
    },
}

impl Settlement {
    /// Proceeds from winning bets on finished events.
    #[must_use]
    pub const fn realized(&self) -> Decimal {
        match self {
            Self::AllSettled { realized, .. } | Self::HedgeSuggested { realized, .. } => *realized,
        }
    }

    /// Initial bankroll minus everything placed plus realized proceeds.
    #[must_use]
    pub const fn bankroll_after(&self) -> Decimal {
        match self {
            Self::AllSettled { bankroll_after, .. } | Self::HedgeSuggested { bankroll_after, .. } => {
                *bankroll_after
            }
        }
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::AllSettled { .. })
    }
}

/// Settles finished events and re-solves over what is still open.
#[derive(Clone)]
pub struct SettlementHedger {
    allocation: AllocationSolver,
}

impl SettlementHedger {
    #[must_use]
    pub const fn new(allocation: AllocationSolver) -> Self {
        Self { allocation }
    }

    /// Settle bets on the events in `finished`.
    ///
    /// Bets on unfinished events are re-solved with the post-settlement
    /// bankroll; a failing re-solve is carried in
    /// [`Settlement::HedgeSuggested`].
    #[must_use]
    pub fn settle(
        &self,
        bets: &[Bet],
        placed: &Allocation,
        initial_bankroll: Decimal,
        finished: &FinishedResults,
        options: &SolveOptions,
    ) -> Settlement {
        let mut realized = Decimal::ZERO;
        let mut open = Vec::new();

        for bet in bets {
            match finished.get(&bet.event()) {
                Some(label) if bet.covers(label) => realized += placed.stake(bet.id()) * bet.odds(),
                Some(_) => {}
                None => open.push(bet.clone()),
            }
        }

        let bankroll_after = initial_bankroll - placed.total() + realized;

        if open.is_empty() {
            info!(realized = %realized, bankroll_after = %bankroll_after, "All bets settled");
            return Settlement::AllSettled {
                realized,
                bankroll_after,
            };
        }

        info!(
            realized = %realized,
            bankroll_after = %bankroll_after,
            open = open.len(),
            "Re-hedging open bets"
        );
        let remaining_solution = self.allocation.solve(&open, bankroll_after, None, options);

        Settlement::HedgeSuggested {
            realized,
            bankroll_after,
            open_bets: open.iter().map(|b| b.id().clone()).collect(),
            remaining_solution,
        }
    }

    /// Credit the realized proceeds of `settlement` to `ledger`.
    ///
    /// Nothing is appended when no bet paid out.
    ///
    /// # Errors
    ///
    /// Propagates ledger failures.
    pub fn record(&self, ledger: &dyn Ledger, settlement: &Settlement) -> Result<Decimal> {
        let realized = settlement.realized();
        if realized.is_zero() {
            return Ok(ledger.balance());
        }
        let note = if settlement.is_settled() {
            "all bets settled"
        } else {
            "partial settlement"
        };
        ledger.apply(realized, LedgerAction::Settlement, note)
    }
}
