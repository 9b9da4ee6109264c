//! Market efficiency of a bet set: implied probabilities and overround.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::Bet;
use super::id::BetId;

/// Overround magnitude below which a book is considered fair (3%).
const FAIR_BAND: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Qualitative reading of the overround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketBias {
    /// Overround within ±3%.
    Fair,
    /// Positive margin in the bookmaker's favour.
    Tight,
    /// Negative margin: the book sums below 1.
    Value,
}

/// Implied probabilities and overround of a bet set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEvaluation {
    pub implied_probs: BTreeMap<BetId, Decimal>,
    /// Sum of implied probabilities minus one.
    pub overround: Decimal,
    pub market_bias: MarketBias,
}

impl MarketEvaluation {
    /// Evaluate the bets as quoted.
    #[must_use]
    pub fn evaluate(bets: &[Bet]) -> Self {
        let implied_probs: BTreeMap<BetId, Decimal> = bets
            .iter()
            .filter(|b| b.odds() > Decimal::ZERO)
            .map(|b| (b.id().clone(), Decimal::ONE / b.odds()))
            .collect();

        let overround = implied_probs.values().copied().sum::<Decimal>() - Decimal::ONE;
        let market_bias = if overround.abs() < FAIR_BAND {
            MarketBias::Fair
        } else if overround > Decimal::ZERO {
            MarketBias::Tight
        } else {
            MarketBias::Value
        };

        Self {
            implied_probs,
            overround,
            market_bias,
        }
    }
}
