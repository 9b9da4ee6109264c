//! Application services.
//!
//! Each service orchestrates domain types through the outbound ports:
//!
//! - [`allocation`]: the max-min stake allocation kernel
//! - [`recalibration`]: evaluate current stakes under new odds, re-solve
//! - [`cashout`]: per-bet cash-out valuation and auto-settlement
//! - [`settlement`]: realized proceeds once events finish
//! - [`smoothing`]: exponential smoothing of consecutive allocations
//! - [`simulation`]: periodic odds-drift and cash-out loop
//! - [`session`]: one session's services sharing a kernel and a ledger

pub mod allocation;
pub mod cashout;
pub mod recalibration;
pub mod session;
pub mod settlement;
pub mod simulation;
pub mod smoothing;
