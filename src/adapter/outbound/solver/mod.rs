//! Solver implementations for integer linear programming.
//!
//! Implements the `port::outbound::solver::Solver` trait with concrete backends.

pub mod highs;
