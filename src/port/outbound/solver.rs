//! Solver port for integer linear programming.
//!
//! Defines the backend-neutral problem representation used by the allocation
//! service and the trait concrete backends implement.
//!
//! # Overview
//!
//! - [`Solver`]: ILP solver interface
//! - [`LpProblem`] / [`IlpProblem`]: Problem definitions
//! - [`LpSolution`]: Solution representation

use std::time::Duration;

use rust_decimal::Decimal;

use crate::domain::constraint::{Constraint, VariableBounds};
use crate::error::Result;

/// Integer linear programming solver.
///
/// Implementations wrap specific solver backends (HiGHS, CBC, etc.) and
/// provide a unified interface for the allocation program.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one solver can be
/// shared by every service.
///
/// # Implementation Notes
///
/// - Infeasibility and time-limit hits are reported through
///   [`SolutionStatus`], not as errors
/// - `Err` is reserved for failures to build or run the model at all
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve an integer linear programming problem.
    ///
    /// Minimizes the objective function with integer constraints on the
    /// specified variables, stopping at the problem's time limit if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be run.
    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution>;
}

/// Linear programming problem definition.
///
/// Represents a minimization problem of the form:
///
/// ```text
/// minimize    c^T * x
/// subject to  constraints
///             bounds on x
/// ```
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Objective function coefficients.
    ///
    /// The solver minimizes `c^T * x` where `c` is this vector.
    pub objective: Vec<Decimal>,

    /// Linear constraints on the variables.
    pub constraints: Vec<Constraint>,

    /// Lower and upper bounds for each variable.
    pub bounds: Vec<VariableBounds>,
}

impl LpProblem {
    /// Create a new LP problem with the specified number of variables.
    ///
    /// Initializes all objective coefficients to zero and all variable bounds
    /// to their defaults.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            objective: vec![Decimal::ZERO; num_vars],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::default(); num_vars],
        }
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// Integer linear programming problem definition.
#[derive(Debug, Clone)]
pub struct IlpProblem {
    /// Underlying linear programming problem.
    pub lp: LpProblem,

    /// Indices of variables constrained to integer values.
    pub integer_vars: Vec<usize>,

    /// Wall-clock limit for the solve, unbounded when `None`.
    pub time_limit: Option<Duration>,
}

impl IlpProblem {
    /// Create an ILP problem from an LP with specified integer variables.
    #[must_use]
    pub const fn new(lp: LpProblem, integer_vars: Vec<usize>) -> Self {
        Self {
            lp,
            integer_vars,
            time_limit: None,
        }
    }

    /// Limit the solve to `limit`.
    #[must_use]
    pub const fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }
}

/// Solution to an integer programming problem.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Values for each decision variable (zeros when no point was found).
    pub values: Vec<Decimal>,

    /// Objective function value at `values`.
    pub objective: Decimal,

    /// Termination status of the solver.
    pub status: SolutionStatus,

    /// Backend-specific detail for non-optimal terminations.
    pub message: Option<String>,
}

impl LpSolution {
    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// A terminal status with no usable point.
    #[must_use]
    pub fn failed(num_vars: usize, status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            values: vec![Decimal::ZERO; num_vars],
            objective: Decimal::ZERO,
            status,
            message: Some(message.into()),
        }
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// Solver found an integer-feasible point without proving optimality.
    Feasible,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// The time limit expired before optimality was proven.
    TimedOut,

    /// Solver encountered an internal error.
    Error,
}

impl SolutionStatus {
    /// Human-readable status label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Feasible => "Integer Feasible",
            Self::Infeasible => "Infeasible",
            Self::Unbounded => "Unbounded",
            Self::TimedOut => "Timed Out",
            Self::Error => "Error",
        }
    }

    /// Whether the returned values describe a usable integer point.
    #[must_use]
    pub const fn has_point(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}
