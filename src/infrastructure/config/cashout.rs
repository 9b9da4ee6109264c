//! Cash-out policy configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::allocation::BudgetMode;
use crate::application::cashout::CashoutPolicy;

/// `[cashout]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CashoutConfig {
    /// Lowest share of gross return offered (e.g., 0.35 = 35%).
    #[serde(default = "default_offer_floor")]
    pub offer_floor: Decimal,
    /// Highest share of gross return offered.
    #[serde(default = "default_offer_ceiling")]
    pub offer_ceiling: Decimal,
    #[serde(default = "default_half")]
    pub importance_base: Decimal,
    #[serde(default = "default_half")]
    pub importance_weight: Decimal,
    #[serde(default = "default_epsilon")]
    pub epsilon: Decimal,
    /// Stake increment for the valuation solves.
    #[serde(default = "default_increment")]
    pub increment: Decimal,
    #[serde(default)]
    pub budget_mode: BudgetMode,
}

fn default_offer_floor() -> Decimal {
    Decimal::new(35, 2)
}

fn default_offer_ceiling() -> Decimal {
    Decimal::new(95, 2)
}

fn default_half() -> Decimal {
    Decimal::new(5, 1)
}

fn default_epsilon() -> Decimal {
    Decimal::new(1, 9)
}

fn default_increment() -> Decimal {
    Decimal::ONE
}

impl Default for CashoutConfig {
    fn default() -> Self {
        Self {
            offer_floor: default_offer_floor(),
            offer_ceiling: default_offer_ceiling(),
            importance_base: default_half(),
            importance_weight: default_half(),
            epsilon: default_epsilon(),
            increment: default_increment(),
            budget_mode: BudgetMode::default(),
        }
    }
}

impl From<&CashoutConfig> for CashoutPolicy {
    fn from(config: &CashoutConfig) -> Self {
        Self {
            offer_floor: config.offer_floor,
            offer_ceiling: config.offer_ceiling,
            importance_base: config.importance_base,
            importance_weight: config.importance_weight,
            epsilon: config.epsilon,
            increment: config.increment,
            budget: config.budget_mode,
        }
    }
}
