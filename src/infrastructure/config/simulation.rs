//! Simulation loop and odds-perturbation configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::odds::perturbed::PerturbationConfig;
use crate::application::simulation::SimulationSettings;

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Pause between rounds in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_perturbation_low")]
    pub perturbation_low: f64,
    #[serde(default = "default_perturbation_high")]
    pub perturbation_high: f64,
    /// Perturbed odds never go below this.
    #[serde(default = "default_odds_floor")]
    pub odds_floor: Decimal,
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_iterations() -> usize {
    5
}

const fn default_interval_ms() -> u64 {
    1000
}

const fn default_perturbation_low() -> f64 {
    0.90
}

const fn default_perturbation_high() -> f64 {
    1.12
}

fn default_odds_floor() -> Decimal {
    Decimal::new(101, 2)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            interval_ms: default_interval_ms(),
            perturbation_low: default_perturbation_low(),
            perturbation_high: default_perturbation_high(),
            odds_floor: default_odds_floor(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub const fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            iterations: self.iterations,
            interval: Duration::from_millis(self.interval_ms),
        }
    }

    #[must_use]
    pub const fn perturbation(&self) -> PerturbationConfig {
        PerturbationConfig {
            low: self.perturbation_low,
            high: self.perturbation_high,
            floor: self.odds_floor,
            seed: self.seed,
        }
    }
}
