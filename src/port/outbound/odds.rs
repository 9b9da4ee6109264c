//! Updated-odds source port.
//!
//! Recalibration and cash-out need a fresh quote for each bet. Where those
//! quotes come from (a feed, a fixture, a random walk for simulation) is an
//! adapter concern.

use crate::domain::bet::{Bet, UpdatedOdds};

/// Produces updated odds for a set of bets.
pub trait OddsSource: Send + Sync {
    /// Return the source name for logging.
    fn name(&self) -> &'static str;

    /// Quote updated odds. Bets left out keep their own odds.
    fn quote(&self, bets: &[Bet]) -> UpdatedOdds;
}
