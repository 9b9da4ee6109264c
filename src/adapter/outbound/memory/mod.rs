//! In-process implementations of persistence ports.

pub mod ledger;
