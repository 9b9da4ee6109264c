//! Builders for domain primitives used across tests.
//!
//! Tests construct bets from string literals and exact decimals, so the
//! builders here panic on invalid input instead of returning errors.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::allocation::Allocation;
use crate::domain::bet::{Bet, UpdatedOdds};
use crate::domain::id::BetId;

/// Parse a decimal literal.
pub fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| panic!("bad decimal {value:?}: {e}"))
}

/// A bet with a minimum stake of 1.
pub fn bet(id: &str, event: usize, covered: &[&str], odds: &str) -> Bet {
    bet_with_min(id, event, covered, odds, "1")
}

/// A bet with an explicit minimum stake.
pub fn bet_with_min(id: &str, event: usize, covered: &[&str], odds: &str, min_stake: &str) -> Bet {
    Bet::try_new(id, event, covered.iter().copied(), d(odds), d(min_stake))
        .unwrap_or_else(|e| panic!("invalid test bet {id}: {e}"))
}

/// Stakes keyed by bet id.
pub fn stakes(pairs: &[(&str, &str)]) -> Allocation {
    pairs.iter().map(|(id, s)| (BetId::from(*id), d(s))).collect()
}

/// Updated odds keyed by bet id.
pub fn odds(pairs: &[(&str, &str)]) -> UpdatedOdds {
    pairs.iter().map(|(id, o)| (BetId::from(*id), d(o))).collect()
}

/// Home, away and home-or-draw on one event.
pub fn single_fixture() -> Vec<Bet> {
    vec![
        bet("H", 0, &["H"], "1.40"),
        bet("A", 0, &["A"], "6.00"),
        bet("HD", 0, &["H", "D"], "1.44"),
    ]
}

/// Two events with full-coverage bets on each.
pub fn two_fixtures() -> Vec<Bet> {
    vec![
        bet("m0_H", 0, &["H"], "2.10"),
        bet("m0_DA", 0, &["D", "A"], "1.95"),
        bet("m1_HD", 1, &["H", "D"], "1.30"),
        bet("m1_A", 1, &["A"], "4.50"),
    ]
}
