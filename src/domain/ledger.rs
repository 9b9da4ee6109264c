//! Bankroll ledger entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why the bankroll moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerAction {
    PlaceBets,
    Cashout,
    Settlement,
    Adjustment,
}

impl LedgerAction {
    /// Stable label used in logs and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaceBets => "place_bets",
            Self::Cashout => "cashout",
            Self::Settlement => "settlement",
            Self::Adjustment => "adjustment",
        }
    }
}

/// One appended bankroll movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    pub action: LedgerAction,
    /// Signed change applied to the balance.
    pub amount: Decimal,
    pub note: String,
    /// Balance immediately after this entry.
    pub balance_after: Decimal,
}

impl LedgerEntry {
    #[must_use]
    pub fn new(
        action: LedgerAction,
        amount: Decimal,
        note: impl Into<String>,
        balance_after: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            action,
            amount,
            note: note.into(),
            balance_after,
        }
    }
}

/// Point-in-time view of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub initial: Decimal,
    pub bankroll: Decimal,
    pub log: Vec<LedgerEntry>,
}
