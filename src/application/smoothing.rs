//! Exponential smoothing of successive allocations.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::allocation::{AllocationSolver, SolveOptions};
use crate::domain::allocation::{Allocation, Solution};
use crate::domain::bet::Bet;
use crate::domain::error::DomainError;
use crate::error::AllocationError;

const SMOOTHED_DP: u32 = 8;

/// Blends each new allocation with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoother {
    lambda: Decimal,
}

impl Default for Smoother {
    fn default() -> Self {
        Self {
            lambda: Decimal::new(2, 1),
        }
    }
}

impl Smoother {
    /// Smoother giving weight `lambda` to the new allocation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSmoothingFactor`] unless `0 ≤ lambda ≤ 1`.
    pub fn new(lambda: Decimal) -> Result<Self, DomainError> {
        if lambda < Decimal::ZERO || lambda > Decimal::ONE {
            return Err(DomainError::InvalidSmoothingFactor { lambda });
        }
        Ok(Self { lambda })
    }

    #[must_use]
    pub const fn lambda(&self) -> Decimal {
        self.lambda
    }

    /// `(1−λ)·previous + λ·new` for every bet in either allocation.
    ///
    /// A bet missing from one side counts as a zero stake there.
    #[must_use]
    pub fn smooth(&self, new: &Allocation, previous: &Allocation) -> Allocation {
        let ids: BTreeSet<_> = new.iter().chain(previous.iter()).map(|(id, _)| id).collect();
        ids.into_iter()
            .map(|id| {
                let blended = (Decimal::ONE - self.lambda) * previous.stake(id)
                    + self.lambda * new.stake(id);
                (id.clone(), blended.round_dp(SMOOTHED_DP))
            })
            .collect()
    }

    /// Solve, then smooth the result against `previous`.
    ///
    /// # Errors
    ///
    /// Propagates the solve failure; nothing is smoothed in that case.
    pub fn solve_smoothed(
        &self,
        allocation: &AllocationSolver,
        bets: &[Bet],
        bankroll: Decimal,
        events: Option<usize>,
        options: &SolveOptions,
        previous: &Allocation,
    ) -> Result<SmoothedSolution, AllocationError> {
        let solution = allocation.solve(bets, bankroll, events, options)?;
        let stakes_smoothed = self.smooth(&solution.stakes, previous);
        Ok(SmoothedSolution {
            solution,
            stakes_smoothed,
        })
    }
}

/// A raw solution with its smoothed stakes. Metrics describe the raw stakes.
#[derive(Debug, Clone, Serialize)]
pub struct SmoothedSolution {
    #[serde(flatten)]
    pub solution: Solution,
    pub stakes_smoothed: Allocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::BetId;
    use rust_decimal_macros::dec;

    fn alloc(pairs: &[(&str, Decimal)]) -> Allocation {
        pairs.iter().map(|(id, s)| (BetId::from(*id), *s)).collect()
    }

    #[test]
    fn blends_per_bet() {
        let smoother = Smoother::default();
        let out = smoother.smooth(
            &alloc(&[("a", dec!(10)), ("b", dec!(0))]),
            &alloc(&[("a", dec!(0)), ("b", dec!(5))]),
        );

        assert_eq!(out.stake(&BetId::from("a")), dec!(2));
        assert_eq!(out.stake(&BetId::from("b")), dec!(4));
    }

    #[test]
    fn lambda_one_takes_new_and_zero_keeps_previous() {
        let new = alloc(&[("a", dec!(7))]);
        let previous = alloc(&[("a", dec!(3))]);

        assert_eq!(Smoother::new(dec!(1)).unwrap().smooth(&new, &previous), new);
        assert_eq!(Smoother::new(dec!(0)).unwrap().smooth(&new, &previous), previous);
    }

    #[test]
    fn missing_bets_count_as_zero() {
        let out = Smoother::default().smooth(&alloc(&[("new", dec!(5))]), &alloc(&[("old", dec!(5))]));

        assert_eq!(out.stake(&BetId::from("new")), dec!(1));
        assert_eq!(out.stake(&BetId::from("old")), dec!(4));
    }

    #[test]
    fn rounds_to_eight_places() {
        let smoother = Smoother::new(dec!(0.333333333333)).unwrap();
        let out = smoother.smooth(&alloc(&[("a", dec!(1))]), &Allocation::new());

        assert_eq!(out.stake(&BetId::from("a")), dec!(0.33333333));
    }

    #[test]
    fn rejects_out_of_range_lambda() {
        assert!(Smoother::new(dec!(-0.1)).is_err());
        assert!(Smoother::new(dec!(1.01)).is_err());
    }
}
