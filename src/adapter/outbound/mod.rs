//! Outbound adapters (driven side).

pub mod memory;
pub mod odds;
pub mod solver;
