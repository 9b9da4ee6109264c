//! Bets: a stake-able claim on a subset of one event's outcomes.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{BetId, OutcomeLabel};

/// Odds overriding the quoted price of some bets.
///
/// Bets missing from the map keep their own odds.
pub type UpdatedOdds = BTreeMap<BetId, Decimal>;

/// A single wager on one event.
///
/// Immutable once constructed. Use [`Bet::repriced`] to obtain a copy quoted
/// at different odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BetRecord", into = "BetRecord")]
pub struct Bet {
    id: BetId,
    event: usize,
    covered: BTreeSet<OutcomeLabel>,
    odds: Decimal,
    min_stake: Decimal,
}

impl Bet {
    /// Create a validated bet.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the coverage is empty, the odds are not
    /// greater than 1, or the minimum stake is negative.
    pub fn try_new<L>(
        id: impl Into<BetId>,
        event: usize,
        covered: impl IntoIterator<Item = L>,
        odds: Decimal,
        min_stake: Decimal,
    ) -> Result<Self, DomainError>
    where
        L: Into<OutcomeLabel>,
    {
        let id = id.into();
        let covered: BTreeSet<OutcomeLabel> = covered.into_iter().map(Into::into).collect();

        if covered.is_empty() {
            return Err(DomainError::EmptyCoverage {
                bet_id: id.to_string(),
            });
        }
        if odds <= Decimal::ONE {
            return Err(DomainError::OddsTooLow {
                bet_id: id.to_string(),
                odds,
            });
        }
        if min_stake < Decimal::ZERO {
            return Err(DomainError::NegativeMinStake {
                bet_id: id.to_string(),
                min_stake,
            });
        }

        Ok(Self {
            id,
            event,
            covered,
            odds,
            min_stake,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &BetId {
        &self.id
    }

    /// Index of the event this bet is settled on.
    #[must_use]
    pub const fn event(&self) -> usize {
        self.event
    }

    #[must_use]
    pub const fn covered(&self) -> &BTreeSet<OutcomeLabel> {
        &self.covered
    }

    /// Whether the bet wins when its event finishes with `label`.
    #[must_use]
    pub fn covers(&self, label: &OutcomeLabel) -> bool {
        self.covered.contains(label)
    }

    #[must_use]
    pub const fn odds(&self) -> Decimal {
        self.odds
    }

    #[must_use]
    pub const fn min_stake(&self) -> Decimal {
        self.min_stake
    }

    /// Odds for this bet under `updated`, falling back to the quoted odds.
    #[must_use]
    pub fn odds_under(&self, updated: &UpdatedOdds) -> Decimal {
        updated.get(&self.id).copied().unwrap_or(self.odds)
    }

    /// Copy of this bet quoted at `odds`.
    ///
    /// Externally supplied odds are taken as given.
    #[must_use]
    pub fn repriced(&self, odds: Decimal) -> Self {
        Self {
            odds,
            ..self.clone()
        }
    }

    /// Smallest number of `increment`-sized units satisfying the minimum stake.
    ///
    /// `None` for a non-positive increment or when the unit count does not
    /// fit in an `i64`.
    #[must_use]
    pub fn min_units(&self, increment: Decimal) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;

        if increment <= Decimal::ZERO {
            return None;
        }
        self.min_stake.checked_div(increment)?.ceil().to_i64()
    }
}

/// Re-price every bet under `updated`.
#[must_use]
pub fn reprice_all(bets: &[Bet], updated: &UpdatedOdds) -> Vec<Bet> {
    bets.iter()
        .map(|bet| bet.repriced(bet.odds_under(updated)))
        .collect()
}

/// Serialized shape of a [`Bet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BetRecord {
    id: BetId,
    #[serde(alias = "event")]
    match_index: usize,
    covered_results: Vec<OutcomeLabel>,
    odds: Decimal,
    #[serde(default = "default_min_stake")]
    min_stake: Decimal,
}

fn default_min_stake() -> Decimal {
    Decimal::ONE
}

impl TryFrom<BetRecord> for Bet {
    type Error = DomainError;

    fn try_from(record: BetRecord) -> Result<Self, Self::Error> {
        Self::try_new(
            record.id,
            record.match_index,
            record.covered_results,
            record.odds,
            record.min_stake,
        )
    }
}

impl From<Bet> for BetRecord {
    fn from(bet: Bet) -> Self {
        Self {
            id: bet.id,
            match_index: bet.event,
            covered_results: bet.covered.into_iter().collect(),
            odds: bet.odds,
            min_stake: bet.min_stake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_empty_coverage() {
        let result = Bet::try_new("x", 0, Vec::<&str>::new(), dec!(2), dec!(1));
        assert!(matches!(result, Err(DomainError::EmptyCoverage { .. })));
    }

    #[test]
    fn rejects_negative_min_stake() {
        let result = Bet::try_new("x", 0, ["H"], dec!(2), dec!(-1));
        assert!(matches!(result, Err(DomainError::NegativeMinStake { .. })));
    }

    #[test]
    fn min_units_rounds_up() {
        let bet = Bet::try_new("x", 0, ["H"], dec!(2), dec!(2.5)).unwrap();
        assert_eq!(bet.min_units(dec!(1)), Some(3));
        assert_eq!(bet.min_units(dec!(0.5)), Some(5));
    }

    #[test]
    fn min_units_rejects_unrepresentable_counts() {
        let bet = Bet::try_new("x", 0, ["H"], dec!(2), dec!(1000000000000)).unwrap();

        assert_eq!(bet.min_units(dec!(0)), None);
        assert_eq!(bet.min_units(dec!(-1)), None);
        assert_eq!(bet.min_units(dec!(0.0000000000000000000000000001)), None);
        assert_eq!(bet.min_units(dec!(0.0000001)), None);
    }

    #[test]
    fn repriced_keeps_everything_but_odds() {
        let bet = Bet::try_new("HD", 1, ["H", "D"], dec!(1.44), dec!(1)).unwrap();
        let moved = bet.repriced(dec!(1.6));

        assert_eq!(moved.odds(), dec!(1.6));
        assert_eq!(moved.id(), bet.id());
        assert_eq!(moved.covered(), bet.covered());
        assert_eq!(bet.odds(), dec!(1.44));
    }

    #[test]
    fn odds_under_falls_back_to_quote() {
        let bet = Bet::try_new("A", 0, ["A"], dec!(6), dec!(1)).unwrap();
        let mut updated = UpdatedOdds::new();
        assert_eq!(bet.odds_under(&updated), dec!(6));

        updated.insert(BetId::from("A"), dec!(5.5));
        assert_eq!(bet.odds_under(&updated), dec!(5.5));
    }

    #[test]
    fn deserializes_payload_with_default_min_stake() {
        let json = r#"{"id":"H","match_index":0,"covered_results":["H"],"odds":"1.40"}"#;
        let bet: Bet = serde_json::from_str(json).unwrap();

        assert_eq!(bet.min_stake(), dec!(1));
        assert!(bet.covers(&OutcomeLabel::from("H")));
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"{"id":"H","match_index":0,"covered_results":["H"],"odds":"0.9"}"#;
        assert!(serde_json::from_str::<Bet>(json).is_err());
    }
}
