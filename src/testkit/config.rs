//! Canonical test configurations and wiring.

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::outbound::solver::highs::HiGHSSolver;
use crate::application::allocation::{AllocationSolver, SolveOptions};
use crate::application::simulation::SimulationSettings;

/// Allocation kernel backed by HiGHS with default alphabet and ceiling.
pub fn highs_allocation() -> AllocationSolver {
    AllocationSolver::new(Arc::new(HiGHSSolver::new()))
}

/// Unit increment, exact budget, no time limit.
pub fn exact_options() -> SolveOptions {
    SolveOptions::default()
}

/// Simulation settings with no pause between rounds.
pub fn fast_simulation(iterations: usize) -> SimulationSettings {
    SimulationSettings {
        iterations,
        interval: Duration::ZERO,
    }
}
