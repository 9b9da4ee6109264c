//! Hedgeline - max-min stake allocation over joint event outcomes.
//!
//! Given bets on one or more events with a shared outcome alphabet, the
//! crate finds the integer stake allocation maximizing the worst-case net
//! over every joint outcome, then supports the position as odds move:
//! recalibration, cash-out valuation, settlement re-hedging and smoothing.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Bets, outcome space, allocations, ledger entries
//! - [`port`] - Traits for the solver backend, ledger and odds sources
//! - [`application`] - Allocation kernel and the services built on it
//! - [`adapter`] - HiGHS backend, in-memory ledger, odds sources, CLI
//! - [`infrastructure`] - Configuration, factories and service wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hedgeline::adapter::outbound::solver::highs::HiGHSSolver;
//! use hedgeline::application::allocation::{AllocationSolver, SolveOptions};
//! use hedgeline::domain::bet::Bet;
//! use rust_decimal::Decimal;
//!
//! let bets = vec![
//!     Bet::try_new("H", 0, ["H"], Decimal::new(140, 2), Decimal::ONE)?,
//!     Bet::try_new("A", 0, ["A"], Decimal::new(600, 2), Decimal::ONE)?,
//!     Bet::try_new("HD", 0, ["H", "D"], Decimal::new(144, 2), Decimal::ONE)?,
//! ];
//! let solver = AllocationSolver::new(Arc::new(HiGHSSolver::new()));
//! let solution = solver.solve(&bets, Decimal::from(6), None, &SolveOptions::default())?;
//! println!("guaranteed net: {}", solution.guaranteed_net);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
