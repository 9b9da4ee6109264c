//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! - [`solver`]: ILP backend for the allocation program
//! - [`ledger`]: bankroll transaction log
//! - [`odds`]: source of updated odds for recalibration and cash-out

pub mod ledger;
pub mod odds;
pub mod solver;
