//! Random-walk odds generator for simulation and demos.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::bet::{Bet, UpdatedOdds};
use crate::port::outbound::odds::OddsSource;

/// Multiplicative perturbation range and floor.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbationConfig {
    /// Smallest multiplier applied to the quoted odds.
    pub low: f64,
    /// Largest multiplier applied to the quoted odds.
    pub high: f64,
    /// Odds never drop below this value.
    pub floor: Decimal,
    /// Seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            low: 0.90,
            high: 1.12,
            floor: Decimal::new(101, 2),
            seed: None,
        }
    }
}

/// Quotes each bet at `odds * U(low, high)`, rounded to 3 dp and floored.
#[derive(Debug)]
pub struct PerturbedOdds {
    config: PerturbationConfig,
    rng: Mutex<StdRng>,
}

impl PerturbedOdds {
    #[must_use]
    pub fn new(config: PerturbationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }
}

impl OddsSource for PerturbedOdds {
    fn name(&self) -> &'static str {
        "perturbed"
    }

    fn quote(&self, bets: &[Bet]) -> UpdatedOdds {
        let (low, high) = if self.config.low <= self.config.high {
            (self.config.low, self.config.high)
        } else {
            (self.config.high, self.config.low)
        };

        let mut rng = self.rng.lock();
        bets.iter()
            .map(|bet| {
                let factor = Decimal::from_f64(rng.gen_range(low..=high)).unwrap_or(Decimal::ONE);
                let odds = (bet.odds() * factor).round_dp(3).max(self.config.floor);
                (bet.id().clone(), odds)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bets() -> Vec<Bet> {
        vec![
            Bet::try_new("H", 0, ["H"], dec!(1.40), dec!(1)).unwrap(),
            Bet::try_new("A", 0, ["A"], dec!(6.00), dec!(1)).unwrap(),
            Bet::try_new("low", 0, ["D"], dec!(1.02), dec!(1)).unwrap(),
        ]
    }

    #[test]
    fn quotes_stay_within_range_and_floor() {
        let source = PerturbedOdds::new(PerturbationConfig {
            seed: Some(7),
            ..PerturbationConfig::default()
        });
        let bets = bets();

        for _ in 0..50 {
            let odds = source.quote(&bets);
            assert_eq!(odds.len(), bets.len());
            for bet in &bets {
                let quoted = odds[bet.id()];
                assert!(quoted >= dec!(1.01));
                let high = (bet.odds() * dec!(1.12)).round_dp(3).max(dec!(1.01));
                let low = (bet.odds() * dec!(0.90)).round_dp(3).max(dec!(1.01));
                assert!(quoted <= high + dec!(0.001), "{quoted} above {high}");
                assert!(quoted >= low - dec!(0.001), "{quoted} below {low}");
            }
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let config = PerturbationConfig {
            seed: Some(42),
            ..PerturbationConfig::default()
        };
        let a = PerturbedOdds::new(config.clone()).quote(&bets());
        let b = PerturbedOdds::new(config).quote(&bets());
        assert_eq!(a, b);
    }
}
