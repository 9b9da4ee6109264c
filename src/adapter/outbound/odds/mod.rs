//! Odds source implementations.

pub mod perturbed;
