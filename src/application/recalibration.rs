//! Recalibration: price the current stakes under updated odds, then re-solve.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::allocation::{AllocationSolver, SolveOptions, SolveResult};
use crate::domain::allocation::{evaluate_scenarios, worst_net, Allocation, Scenario};
use crate::domain::bet::{reprice_all, Bet, UpdatedOdds};
use crate::error::AllocationError;

/// Current position under updated odds next to the fresh optimum.
#[derive(Debug, Clone, Serialize)]
pub struct RecalibrationReport {
    /// Worst net of the current stakes under the updated odds.
    pub current_net: Decimal,
    /// Per-outcome payout and net of the current stakes.
    pub current_scenarios: Vec<Scenario>,
    /// Re-solved allocation on the repriced bets.
    #[serde(serialize_with = "super::allocation::serialize_solve_result")]
    pub recommended: SolveResult,
}

impl RecalibrationReport {
    /// Guaranteed net of the recommendation, if it solved.
    #[must_use]
    pub fn recommended_net(&self) -> Option<Decimal> {
        self.recommended.as_ref().ok().map(|s| s.guaranteed_net)
    }
}

/// Re-evaluates an existing position when odds move.
#[derive(Clone)]
pub struct Recalibrator {
    allocation: AllocationSolver,
}

impl Recalibrator {
    #[must_use]
    pub const fn new(allocation: AllocationSolver) -> Self {
        Self { allocation }
    }

    /// Evaluate `stakes` under `updated` and re-solve for `bankroll`.
    ///
    /// Bets missing from `updated` keep their original odds. A failed
    /// re-solve is reported in [`RecalibrationReport::recommended`] rather
    /// than as an error, so the current evaluation is always returned.
    ///
    /// # Errors
    ///
    /// Fails only when the bet set itself is invalid (bad event index,
    /// unknown label, outcome space too large).
    pub fn recalibrate(
        &self,
        bets: &[Bet],
        stakes: &Allocation,
        bankroll: Decimal,
        updated: &UpdatedOdds,
        events: Option<usize>,
        options: &SolveOptions,
    ) -> Result<RecalibrationReport, AllocationError> {
        let model = self.allocation.outcome_model(bets, events)?;
        let current_scenarios =
            evaluate_scenarios(bets, stakes, updated, &model.space, &model.incidence);
        let current_net = worst_net(&current_scenarios);

        let repriced = reprice_all(bets, updated);
        let recommended = self
            .allocation
            .solve(&repriced, bankroll, Some(model.space.events()), options);

        match &recommended {
            Ok(solution) => info!(
                current_net = %current_net,
                recommended_net = %solution.guaranteed_net,
                "Recalibrated position"
            ),
            Err(e) => warn!(
                current_net = %current_net,
                status = e.status(),
                "Recalibration re-solve failed"
            ),
        }

        Ok(RecalibrationReport {
            current_net,
            current_scenarios,
            recommended,
        })
    }
}
