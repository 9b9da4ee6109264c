//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for bets, stakes and canned bet sets.
//! - [`odds`] - Scripted [`OddsSource`](crate::port::outbound::odds::OddsSource).
//! - [`config`] - Canonical test configurations and service wiring.

pub mod config;
pub mod domain;
pub mod odds;
