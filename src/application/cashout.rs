//! Cash-out valuation.
//!
//! A bet's offer scales with how much the position's guaranteed net depends
//! on it. For each staked bet the portfolio is re-solved without it; the drop
//! in guaranteed net relative to the baseline is the bet's importance. More
//! important bets are offered a larger share of their gross return, between
//! the policy floor and ceiling. Offers that beat the stake are accepted
//! unless the call is a dry run.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, info};

use super::allocation::{AllocationSolver, BudgetMode, SolveOptions};
use super::recalibration::Recalibrator;
use crate::domain::allocation::Allocation;
use crate::domain::bet::{reprice_all, Bet, UpdatedOdds};
use crate::domain::id::BetId;
use crate::domain::ledger::LedgerAction;
use crate::error::Result;
use crate::port::outbound::ledger::Ledger;
use crate::port::outbound::odds::OddsSource;

/// Offers are quoted to this many decimal places.
const OFFER_DP: u32 = 3;

/// Constants of the offer rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashoutPolicy {
    /// Lowest share of gross return ever offered.
    pub offer_floor: Decimal,
    /// Highest share of gross return ever offered.
    pub offer_ceiling: Decimal,
    /// Importance of a bet whose removal leaves the guaranteed net unchanged.
    pub importance_base: Decimal,
    /// Scale applied to the relative change in guaranteed net.
    pub importance_weight: Decimal,
    /// Added to `|base_R|` before dividing.
    pub epsilon: Decimal,
    /// Solve options for the baseline and leave-one-out solves.
    pub increment: Decimal,
    pub budget: BudgetMode,
}

impl Default for CashoutPolicy {
    fn default() -> Self {
        Self {
            offer_floor: Decimal::new(35, 2),
            offer_ceiling: Decimal::new(95, 2),
            importance_base: Decimal::new(5, 1),
            importance_weight: Decimal::new(5, 1),
            epsilon: Decimal::new(1, 9),
            increment: Decimal::ONE,
            budget: BudgetMode::Exact,
        }
    }
}

impl CashoutPolicy {
    fn solve_options(&self) -> SolveOptions {
        SolveOptions::default()
            .with_increment(self.increment)
            .with_budget(self.budget)
    }

    /// Importance in `[0, 1]` of a bet whose removal moves the guaranteed net
    /// from `base_net` by `delta`.
    #[must_use]
    pub fn importance(&self, base_net: Decimal, delta: Decimal) -> Decimal {
        let relative = delta / (base_net.abs() + self.epsilon);
        (self.importance_base + self.importance_weight * relative).clamp(Decimal::ZERO, Decimal::ONE)
    }

    /// Offer for a bet returning `gross` if it wins, given its importance.
    ///
    /// Within `[offer_floor·gross, offer_ceiling·gross]`, rounded to three
    /// decimal places inward at the bounds. When the band is too narrow to
    /// hold a three-decimal value, the ceiling rounded toward zero.
    #[must_use]
    pub fn offer(&self, gross: Decimal, importance: Decimal) -> Decimal {
        let share = self.offer_floor + (self.offer_ceiling - self.offer_floor) * importance;
        let lower = (gross * self.offer_floor)
            .round_dp_with_strategy(OFFER_DP, RoundingStrategy::AwayFromZero);
        let upper = (gross * self.offer_ceiling)
            .round_dp_with_strategy(OFFER_DP, RoundingStrategy::ToZero);
        let offer = (gross * share).round_dp(OFFER_DP);
        if lower > upper {
            return upper;
        }
        offer.clamp(lower, upper)
    }
}

/// Whether an offer beats the stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Profitable,
    NotProfitable,
}

/// Cash-out quote for one bet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashoutOffer {
    pub bet_id: BetId,
    pub stake: Decimal,
    /// Odds the offer was priced at.
    pub odds: Decimal,
    pub offer: Decimal,
    /// Offer over gross return.
    pub ratio: Decimal,
    /// Drop in guaranteed net when the bet is left out.
    #[serde(rename = "delta_R")]
    pub delta_net: Decimal,
    pub status: OfferStatus,
}

/// Result of one valuation round.
#[derive(Debug, Clone, Serialize)]
pub struct CashoutReport {
    pub offers: Vec<CashoutOffer>,
    pub accepted: BTreeMap<BetId, Decimal>,
    pub total_cashout: Decimal,
    pub remaining_stakes: Allocation,
    #[serde(rename = "base_R")]
    pub base_net: Decimal,
    pub updated_odds: UpdatedOdds,
}

/// Values open bets for cash-out.
#[derive(Clone)]
pub struct CashoutValuator {
    allocation: AllocationSolver,
    recalibrator: Recalibrator,
    odds: Arc<dyn OddsSource>,
    policy: CashoutPolicy,
}

impl CashoutValuator {
    /// `odds` quotes the bets when the caller supplies no updated odds.
    #[must_use]
    pub fn new(allocation: AllocationSolver, odds: Arc<dyn OddsSource>, policy: CashoutPolicy) -> Self {
        Self {
            recalibrator: Recalibrator::new(allocation.clone()),
            allocation,
            odds,
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &CashoutPolicy {
        &self.policy
    }

    /// Value every staked bet and, unless `dry_run`, accept profitable offers.
    ///
    /// Accepted offers zero the bet's stake in
    /// [`CashoutReport::remaining_stakes`] and are credited to `ledger` as one
    /// aggregated entry.
    ///
    /// # Errors
    ///
    /// Fails if the bet set is invalid or the ledger rejects the append.
    /// Solver failures only degrade the valuation.
    pub fn value(
        &self,
        stakes: &Allocation,
        bets: &[Bet],
        updated: Option<&UpdatedOdds>,
        dry_run: bool,
        ledger: Option<&dyn Ledger>,
    ) -> Result<CashoutReport> {
        let updated = match updated {
            Some(odds) => odds.clone(),
            None => {
                debug!(source = self.odds.name(), "Quoting odds for cash-out");
                self.odds.quote(bets)
            }
        };
        let options = self.policy.solve_options();
        let total_staked = stakes.total();

        let base = self
            .recalibrator
            .recalibrate(bets, stakes, total_staked, &updated, None, &options)?;
        let base_net = base.recommended_net().unwrap_or(base.current_net);
        let events = Some(crate::domain::outcome::infer_event_count(bets));

        let repriced = reprice_all(bets, &updated);
        let mut offers = Vec::new();
        let mut accepted = BTreeMap::new();
        let mut remaining = stakes.clone();
        let mut total_cashout = Decimal::ZERO;

        for (index, bet) in repriced.iter().enumerate() {
            let stake = stakes.stake(bet.id());
            if stake <= Decimal::ZERO {
                continue;
            }

            let others: Vec<Bet> = repriced
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .map(|(_, b)| b.clone())
                .collect();
            let net_without = match self
                .allocation
                .solve(&others, total_staked - stake, events, &options)
            {
                Ok(solution) => solution.guaranteed_net,
                Err(e) => {
                    debug!(bet = %bet.id(), status = e.status(), "Leave-one-out solve failed");
                    Decimal::ZERO
                }
            };

            let delta_net = base_net - net_without;
            let importance = self.policy.importance(base_net, delta_net);
            let gross = stake * bet.odds();
            let offer = self.policy.offer(gross, importance);
            let ratio = if gross > Decimal::ZERO {
                (offer / gross).round_dp(OFFER_DP)
            } else {
                Decimal::ZERO
            };
            let status = if offer > stake {
                OfferStatus::Profitable
            } else {
                OfferStatus::NotProfitable
            };

            if status == OfferStatus::Profitable && !dry_run {
                accepted.insert(bet.id().clone(), offer);
                remaining.set(bet.id().clone(), Decimal::ZERO);
                total_cashout += offer;
            }

            offers.push(CashoutOffer {
                bet_id: bet.id().clone(),
                stake,
                odds: bet.odds(),
                offer,
                ratio,
                delta_net,
                status,
            });
        }

        if !accepted.is_empty() {
            if let Some(ledger) = ledger {
                let note = format!("cashout of {} bets", accepted.len());
                ledger.apply(total_cashout, LedgerAction::Cashout, &note)?;
            }
        }

        info!(
            offers = offers.len(),
            accepted = accepted.len(),
            total_cashout = %total_cashout,
            base_net = %base_net,
            dry_run,
            "Cash-out valuation complete"
        );

        Ok(CashoutReport {
            offers,
            accepted,
            total_cashout,
            remaining_stakes: remaining,
            base_net,
            updated_odds: updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn importance_is_clamped() {
        let policy = CashoutPolicy::default();

        assert_eq!(policy.importance(dec!(1), dec!(0)), dec!(0.5));
        assert_eq!(policy.importance(dec!(1), dec!(100)), dec!(1));
        assert_eq!(policy.importance(dec!(1), dec!(-100)), dec!(0));
    }

    #[test]
    fn offer_spans_floor_to_ceiling() {
        let policy = CashoutPolicy::default();

        assert_eq!(policy.offer(dec!(10), dec!(0)), dec!(3.5));
        assert_eq!(policy.offer(dec!(10), dec!(1)), dec!(9.5));
        assert_eq!(policy.offer(dec!(10), dec!(0.5)), dec!(6.5));
    }

    #[test]
    fn offer_rounding_stays_inside_bounds() {
        let policy = CashoutPolicy::default();
        let gross = dec!(1.2345);

        for importance in [dec!(0), dec!(0.25), dec!(0.999), dec!(1)] {
            let offer = policy.offer(gross, importance);
            assert!(offer >= gross * dec!(0.35), "{offer}");
            assert!(offer <= gross * dec!(0.95), "{offer}");
            assert_eq!(offer, offer.round_dp(3));
        }
    }

    #[test]
    fn offer_on_sub_cent_gross_never_exceeds_ceiling() {
        let policy = CashoutPolicy::default();

        for gross in [dec!(0.001), dec!(0.0015), dec!(0.0004)] {
            for importance in [dec!(0), dec!(0.5), dec!(1)] {
                let offer = policy.offer(gross, importance);
                assert!(offer <= gross * dec!(0.95), "gross {gross}: {offer}");
                assert!(offer >= Decimal::ZERO, "gross {gross}: {offer}");
            }
        }
        assert_eq!(policy.offer(dec!(0.001), dec!(1)), dec!(0));
    }
}
