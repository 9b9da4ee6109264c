//! Pure domain types: bets, the outcome space, allocations and ledger entries.

pub mod allocation;
pub mod bet;
pub mod constraint;
pub mod error;
pub mod id;
pub mod ledger;
pub mod market;
pub mod outcome;
