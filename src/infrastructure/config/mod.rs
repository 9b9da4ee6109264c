//! Configuration sections and loading.

pub mod cashout;
pub mod ledger;
pub mod logging;
pub mod settings;
pub mod simulation;
pub mod smoothing;
pub mod solver;
