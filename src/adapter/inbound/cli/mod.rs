//! Command-line adapter.
//!
//! Parses arguments, reads JSON requests, calls the session's services and
//! renders their reports.

pub mod allocate;
pub mod cashout;
pub mod command;
pub mod output;
pub mod report;
pub mod request;
pub mod run;
pub mod settle;
pub mod simulate;
