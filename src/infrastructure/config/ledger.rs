//! Ledger configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `[ledger]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Opening balance of an in-process ledger.
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Decimal,
}

fn default_initial_balance() -> Decimal {
    Decimal::from(100)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
        }
    }
}
