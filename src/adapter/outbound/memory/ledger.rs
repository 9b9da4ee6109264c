//! In-memory bankroll ledger.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::ledger::{LedgerAction, LedgerEntry, LedgerSnapshot};
use crate::error::Result;
use crate::port::outbound::ledger::Ledger;

#[derive(Debug)]
struct LedgerState {
    balance: Decimal,
    entries: Vec<LedgerEntry>,
}

/// Ledger held in process memory.
///
/// Balance and log sit behind a single lock so an append and its balance
/// adjustment are observed together. One instance per session; share it
/// with `Arc` rather than through a global.
#[derive(Debug)]
pub struct MemoryLedger {
    initial: Decimal,
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    /// Create a ledger opening at `initial`.
    #[must_use]
    pub fn new(initial: Decimal) -> Self {
        Self {
            initial,
            state: Mutex::new(LedgerState {
                balance: initial,
                entries: Vec::new(),
            }),
        }
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self) -> Decimal {
        self.state.lock().balance
    }

    fn apply(&self, delta: Decimal, action: LedgerAction, note: &str) -> Result<Decimal> {
        let balance = {
            let mut state = self.state.lock();
            state.balance += delta;
            let balance = state.balance;
            state
                .entries
                .push(LedgerEntry::new(action, delta, note, balance));
            balance
        };

        info!(
            action = action.as_str(),
            amount = %delta,
            balance = %balance,
            note,
            "Ledger updated"
        );
        Ok(balance)
    }

    fn entries(&self) -> Vec<LedgerEntry> {
        self.state.lock().entries.clone()
    }

    fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.lock();
        LedgerSnapshot {
            initial: self.initial,
            bankroll: state.balance,
            log: state.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn apply_adjusts_balance_and_appends() {
        let ledger = MemoryLedger::new(dec!(100));

        let after = ledger
            .apply(dec!(-6), LedgerAction::PlaceBets, "opening stake")
            .unwrap();
        assert_eq!(after, dec!(94));

        let after = ledger
            .apply(dec!(7.5), LedgerAction::Cashout, "2 bets cashed out")
            .unwrap();
        assert_eq!(after, dec!(101.5));

        let entries = ledger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, LedgerAction::PlaceBets);
        assert_eq!(entries[0].balance_after, dec!(94));
        assert_eq!(entries[1].amount, dec!(7.5));
    }

    #[test]
    fn snapshot_is_consistent() {
        let ledger = MemoryLedger::new(dec!(50));
        ledger
            .apply(dec!(5), LedgerAction::Adjustment, "top up")
            .unwrap();

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.initial, dec!(50));
        assert_eq!(snapshot.bankroll, dec!(55));
        assert_eq!(
            snapshot.initial + snapshot.log.iter().map(|e| e.amount).sum::<Decimal>(),
            snapshot.bankroll
        );
    }
}
