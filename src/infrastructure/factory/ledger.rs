//! Ledger factory.

use std::sync::Arc;

use crate::adapter::outbound::memory::ledger::MemoryLedger;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::ledger::Ledger;

/// Build a session ledger opened at `[ledger].initial_balance`.
#[must_use]
pub fn build_ledger(config: &Config) -> Arc<dyn Ledger> {
    Arc::new(MemoryLedger::new(config.ledger.initial_balance))
}
