//! Stake allocations and the solutions that produce them.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::{Bet, UpdatedOdds};
use super::id::BetId;
use super::market::MarketEvaluation;
use super::outcome::{Incidence, JointOutcome, OutcomeSpace};

/// Stake per bet id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<BetId, Decimal>);

impl Allocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stake on `id`, zero when absent.
    #[must_use]
    pub fn stake(&self, id: &BetId) -> Decimal {
        self.0.get(id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, id: BetId, stake: Decimal) {
        self.0.insert(id, stake);
    }

    /// Sum of all stakes.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BetId, &Decimal)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(BetId, Decimal)> for Allocation {
    fn from_iter<T: IntoIterator<Item = (BetId, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Payout and net of a portfolio under one joint outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub outcome: JointOutcome,
    pub payout: Decimal,
    pub net: Decimal,
}

/// Evaluate `stakes` under every outcome of `space`.
///
/// `odds` overrides the bets' quoted odds where present. The net of each
/// scenario is its payout minus the total of `stakes`.
#[must_use]
pub fn evaluate_scenarios(
    bets: &[Bet],
    stakes: &Allocation,
    odds: &UpdatedOdds,
    space: &OutcomeSpace,
    incidence: &Incidence,
) -> Vec<Scenario> {
    let total = stakes.total();
    space
        .outcomes()
        .iter()
        .enumerate()
        .map(|(w, outcome)| {
            let payout: Decimal = bets
                .iter()
                .enumerate()
                .filter(|(i, _)| incidence.wins(*i, w))
                .map(|(_, bet)| stakes.stake(bet.id()) * bet.odds_under(odds))
                .sum();
            Scenario {
                outcome: outcome.clone(),
                payout,
                net: payout - total,
            }
        })
        .collect()
}

/// Worst net across scenarios, zero when there are none.
#[must_use]
pub fn worst_net(scenarios: &[Scenario]) -> Decimal {
    scenarios
        .iter()
        .map(|s| s.net)
        .min()
        .unwrap_or(Decimal::ZERO)
}

/// Dispersion of nets across outcomes (population variance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub mean_net: f64,
    pub var_net: f64,
    pub std_net: f64,
}

impl RiskMetrics {
    #[must_use]
    pub fn from_scenarios(scenarios: &[Scenario]) -> Self {
        if scenarios.is_empty() {
            return Self {
                mean_net: 0.0,
                var_net: 0.0,
                std_net: 0.0,
            };
        }
        let nets: Vec<f64> = scenarios
            .iter()
            .map(|s| s.net.to_f64().unwrap_or(0.0))
            .collect();
        let n = nets.len() as f64;
        let mean_net = nets.iter().sum::<f64>() / n;
        let var_net = nets.iter().map(|x| (x - mean_net).powi(2)).sum::<f64>() / n;
        Self {
            mean_net,
            var_net,
            std_net: var_net.sqrt(),
        }
    }
}

/// How the solver terminated for a returned solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Integer-feasible without an optimality proof.
    Feasible,
}

/// An allocation maximizing the guaranteed net, with its diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub stakes: Allocation,
    /// Stake of each bet in increments.
    pub units: BTreeMap<BetId, i64>,
    pub total_stakes: Decimal,
    /// Guaranteed (worst-case) net across all outcomes.
    #[serde(rename = "R")]
    pub guaranteed_net: Decimal,
    pub scenarios: Vec<Scenario>,
    pub risk_metrics: RiskMetrics,
    pub market: MarketEvaluation,
}
