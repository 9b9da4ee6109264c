//! Factory functions that construct fully-configured services from
//! configuration.
//!
//! - [`solver`] - Allocation kernel, odds source and dependent services
//! - [`ledger`] - Ledger construction

pub mod ledger;
pub mod solver;
