//! Bankroll ledger port.

use rust_decimal::Decimal;

use crate::domain::ledger::{LedgerAction, LedgerEntry, LedgerSnapshot};
use crate::error::Result;

/// Append-only bankroll log with a running balance.
///
/// Implementations must make `apply` atomic: the balance after any sequence
/// of concurrent appends equals the initial balance plus the sum of all
/// appended deltas, and entries are never rewritten.
pub trait Ledger: Send + Sync {
    /// Current balance.
    fn balance(&self) -> Decimal;

    /// Append `delta` and adjust the balance, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the append; the balance
    /// is unchanged in that case.
    fn apply(&self, delta: Decimal, action: LedgerAction, note: &str) -> Result<Decimal>;

    /// Entries in append order.
    fn entries(&self) -> Vec<LedgerEntry>;

    /// Balance and entries read under one consistent view.
    fn snapshot(&self) -> LedgerSnapshot;
}
