//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic Rust usage.

use std::time::Duration;

use good_lp::solvers::highs::highs;
use good_lp::solvers::SolutionStatus as LpStatus;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::constraint::ConstraintSense;
use crate::error::{Error, Result};
use crate::port::outbound::solver::{IlpProblem, LpProblem, LpSolution, SolutionStatus, Solver};

/// good_lp's report for a limit stop with no primal point.
const NO_SOLUTION_FOUND: &str = "NoSolutionFound";

/// HiGHS-based ILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution> {
        solve_with_good_lp(&problem.lp, &problem.integer_vars, problem.time_limit)
    }
}

/// Internal solver implementation using good_lp.
fn solve_with_good_lp(
    problem: &LpProblem,
    integer_vars: &[usize],
    time_limit: Option<Duration>,
) -> Result<LpSolution> {
    let n = problem.num_vars();

    if n == 0 {
        return Ok(LpSolution {
            values: vec![],
            objective: Decimal::ZERO,
            status: SolutionStatus::Optimal,
            message: None,
        });
    }

    if problem.bounds.len() != n {
        return Err(Error::Solver(format!(
            "{} bounds for {n} variables",
            problem.bounds.len()
        )));
    }
    if let Some(bad) = problem.constraints.iter().find(|c| c.coefficients.len() != n) {
        return Err(Error::Solver(format!(
            "constraint {} has {} coefficients for {n} variables",
            bad.name,
            bad.coefficients.len()
        )));
    }

    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for (i, bounds) in problem.bounds.iter().enumerate() {
        let mut v = variable();

        if let Some(lb) = bounds.lower {
            v = v.min(lb.to_f64().unwrap_or(0.0));
        }
        if let Some(ub) = bounds.upper {
            v = v.max(ub.to_f64().unwrap_or(f64::INFINITY));
        }
        if integer_vars.contains(&i) {
            v = v.integer();
        }

        var_list.push(vars.add(v));
    }

    let objective: Expression = var_list
        .iter()
        .zip(problem.objective.iter())
        .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
        .sum();

    let mut model = vars.minimise(&objective).using(highs);
    if let Some(limit) = time_limit {
        model = model.set_time_limit(limit.as_secs_f64());
    }

    for constr in &problem.constraints {
        let lhs: Expression = var_list
            .iter()
            .zip(constr.coefficients.iter())
            .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
            .sum();

        let rhs = constr.rhs.to_f64().unwrap_or(0.0);

        model = match constr.sense {
            ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
            ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    debug!(
        vars = n,
        constraints = problem.constraints.len(),
        integers = integer_vars.len(),
        "Solving with HiGHS"
    );

    match model.solve() {
        Ok(solution) => {
            let status = match solution.status() {
                LpStatus::Optimal => SolutionStatus::Optimal,
                LpStatus::GapLimit => SolutionStatus::Feasible,
                // An incumbent found before the limit is still unproven.
                LpStatus::TimeLimit => SolutionStatus::TimedOut,
            };
            let values: Vec<Decimal> = var_list
                .iter()
                .map(|v| Decimal::try_from(solution.value(*v)).unwrap_or(Decimal::ZERO))
                .collect();

            let objective = values
                .iter()
                .zip(problem.objective.iter())
                .map(|(v, c)| *v * *c)
                .sum();

            Ok(LpSolution {
                values,
                objective,
                status,
                message: None,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(LpSolution::failed(
            n,
            SolutionStatus::Infeasible,
            "problem is infeasible",
        )),
        Err(ResolutionError::Unbounded) => Ok(LpSolution::failed(
            n,
            SolutionStatus::Unbounded,
            "problem is unbounded",
        )),
        Err(ResolutionError::Other(NO_SOLUTION_FOUND)) if time_limit.is_some() => {
            Ok(LpSolution::failed(
                n,
                SolutionStatus::TimedOut,
                "time limit reached before a solution",
            ))
        }
        Err(err) => Ok(LpSolution::failed(n, SolutionStatus::Error, err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraint::{Constraint, VariableBounds};
    use rust_decimal_macros::dec;

    #[test]
    fn test_solver_name() {
        let solver = HiGHSSolver::new();
        assert_eq!(solver.name(), "highs");
    }

    #[test]
    fn test_integer_knapsack() {
        // Maximize: 3x + 2y  (minimize the negation)
        // Subject to: 2x + y <= 5
        //            x, y integer >= 0
        let solver = HiGHSSolver::new();

        let lp = LpProblem {
            objective: vec![dec!(-3), dec!(-2)],
            constraints: vec![Constraint::at_most(
                "capacity",
                vec![dec!(2), dec!(1)],
                dec!(5),
            )],
            bounds: vec![VariableBounds::default(); 2],
        };

        let solution = solver.solve_ilp(&IlpProblem::new(lp, vec![0, 1])).unwrap();

        assert!(solution.is_optimal());
        // Best is x=0, y=5 (objective -10)
        assert!(
            (solution.objective + dec!(10)).abs() < dec!(0.01),
            "Objective should be ~-10, got {}",
            solution.objective
        );
    }

    #[test]
    fn test_free_variable_goes_negative() {
        // Minimize: -r  subject to  r <= -2
        let solver = HiGHSSolver::new();
        let lp = LpProblem {
            objective: vec![dec!(-1)],
            constraints: vec![Constraint::at_most("cap", vec![dec!(1)], dec!(-2))],
            bounds: vec![VariableBounds::free()],
        };

        let solution = solver.solve_ilp(&IlpProblem::new(lp, vec![])).unwrap();

        assert!(solution.is_optimal());
        assert!((solution.values[0] + dec!(2)).abs() < dec!(0.01));
    }

    #[test]
    fn test_infeasible_reports_status() {
        let solver = HiGHSSolver::new();
        let lp = LpProblem {
            objective: vec![dec!(1)],
            constraints: vec![
                Constraint::at_least("low", vec![dec!(1)], dec!(5)),
                Constraint::at_most("high", vec![dec!(1)], dec!(3)),
            ],
            bounds: vec![VariableBounds::default()],
        };

        let solution = solver.solve_ilp(&IlpProblem::new(lp, vec![0])).unwrap();

        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(!solution.status.has_point());
    }

    #[test]
    fn test_mismatched_coefficients_is_an_error() {
        let solver = HiGHSSolver::new();
        let lp = LpProblem {
            objective: vec![dec!(1), dec!(1)],
            constraints: vec![Constraint::at_least("short", vec![dec!(1)], dec!(1))],
            bounds: vec![VariableBounds::default(); 2],
        };

        assert!(solver.solve_ilp(&IlpProblem::new(lp, vec![])).is_err());
    }

    #[test]
    fn test_empty_problem() {
        let solver = HiGHSSolver::new();
        let problem = IlpProblem::new(LpProblem::new(0), vec![]);
        let solution = solver.solve_ilp(&problem).unwrap();

        assert!(solution.is_optimal());
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_zero_time_limit_reports_timed_out() {
        let solver = HiGHSSolver::new();
        let lp = LpProblem {
            objective: vec![dec!(-3), dec!(-2)],
            constraints: vec![Constraint::at_most(
                "capacity",
                vec![dec!(2), dec!(1)],
                dec!(5),
            )],
            bounds: vec![VariableBounds::default(); 2],
        };
        let problem = IlpProblem::new(lp, vec![0, 1]).with_time_limit(Some(Duration::ZERO));

        let solution = solver.solve_ilp(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::TimedOut);
        assert!(!solution.status.has_point());
    }
}
