//! Max-min stake allocation.
//!
//! Builds and solves the integer program
//!
//! ```text
//! maximize    R
//! subject to  Σ_i z_i · inc · odds_i · I(i, ω) − S ≥ R     for every ω ∈ Ω
//!             budget(Σ_i z_i · inc, S)
//!             z_i ≥ ceil(min_stake_i / inc),  z_i integer
//! ```
//!
//! where `z_i` is the stake of bet `i` in increments and `R` is the
//! guaranteed net. One constraint is generated per joint outcome, so the
//! program grows as `|alphabet|^k`; the configured outcome ceiling is the
//! hard bound on problem size.
//!
//! Among equally good allocations the one returned is whatever the backend
//! lands on. Callers must not rely on a particular tie-break.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::domain::allocation::{evaluate_scenarios, worst_net, Allocation, RiskMetrics, Solution, SolveStatus};
use crate::domain::bet::{Bet, UpdatedOdds};
use crate::domain::constraint::{Constraint, VariableBounds};
use crate::domain::market::MarketEvaluation;
use crate::domain::outcome::{infer_event_count, Incidence, OutcomeAlphabet, OutcomeSpace};
use crate::error::AllocationError;
use crate::port::outbound::solver::{IlpProblem, LpProblem, SolutionStatus, Solver};

/// Slack allowed on budget constraints that compare against the raw bankroll.
const BUDGET_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Outcome of one allocation solve.
pub type SolveResult = Result<Solution, AllocationError>;

/// Serialize a solve result as either the solution or the tagged error.
///
/// Both shapes carry a `status` field, so consumers can branch on it.
pub(crate) fn serialize_solve_result<S>(result: &SolveResult, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match result {
        Ok(solution) => solution.serialize(serializer),
        Err(err) => err.serialize(serializer),
    }
}

/// How total stake is tied to the bankroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// Stake exactly the largest multiple of the increment not above the bankroll.
    #[default]
    Exact,
    /// Stake the bankroll itself, within a 1e-6 tolerance.
    ExactStrict,
    /// Stake at most the bankroll.
    AtMost,
}

/// Per-call knobs shared by every service that solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Stake granularity.
    pub increment: Decimal,
    pub budget: BudgetMode,
    /// Limit on the ILP step only.
    pub time_limit: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            increment: Decimal::ONE,
            budget: BudgetMode::Exact,
            time_limit: None,
        }
    }
}

impl SolveOptions {
    #[must_use]
    pub const fn with_increment(mut self, increment: Decimal) -> Self {
        self.increment = increment;
        self
    }

    #[must_use]
    pub const fn with_budget(mut self, budget: BudgetMode) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub const fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }
}

/// Validated outcome universe and incidence for a bet set.
#[derive(Debug, Clone)]
pub struct OutcomeModel {
    pub space: OutcomeSpace,
    pub incidence: Incidence,
}

/// The allocation kernel shared by recalibration, cash-out, settlement,
/// smoothing and simulation.
#[derive(Clone)]
pub struct AllocationSolver {
    solver: Arc<dyn Solver>,
    alphabet: OutcomeAlphabet,
    max_outcomes: usize,
}

impl AllocationSolver {
    /// Default ceiling on |Ω|: ten three-way events.
    pub const DEFAULT_MAX_OUTCOMES: usize = 59_049;

    #[must_use]
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        Self {
            solver,
            alphabet: OutcomeAlphabet::default(),
            max_outcomes: Self::DEFAULT_MAX_OUTCOMES,
        }
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: OutcomeAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    #[must_use]
    pub const fn with_max_outcomes(mut self, max_outcomes: usize) -> Self {
        self.max_outcomes = max_outcomes;
        self
    }

    #[must_use]
    pub const fn alphabet(&self) -> &OutcomeAlphabet {
        &self.alphabet
    }

    /// Name of the backend in use.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.solver.name()
    }

    /// Enumerate Ω for `bets` and evaluate incidence.
    ///
    /// `events` defaults to one more than the largest referenced event.
    ///
    /// # Errors
    ///
    /// Fails when a bet points outside the modelled events or the alphabet,
    /// or when Ω would exceed the outcome ceiling.
    pub fn outcome_model(
        &self,
        bets: &[Bet],
        events: Option<usize>,
    ) -> Result<OutcomeModel, AllocationError> {
        let events = events.unwrap_or_else(|| infer_event_count(bets));

        for bet in bets {
            if bet.event() >= events {
                return Err(AllocationError::EventIndexOutOfRange {
                    bet_id: bet.id().to_string(),
                    event: bet.event(),
                    events,
                });
            }
            if let Some(label) = bet.covered().iter().find(|l| !self.alphabet.contains(l)) {
                return Err(AllocationError::UnknownOutcome {
                    bet_id: bet.id().to_string(),
                    label: label.to_string(),
                });
            }
        }

        match self.alphabet.space_size(events) {
            Some(size) if size <= self.max_outcomes => {}
            _ => {
                return Err(AllocationError::OutcomeSpaceTooLarge {
                    events,
                    limit: self.max_outcomes,
                })
            }
        }

        let space = OutcomeSpace::build(&self.alphabet, events);
        let incidence = Incidence::build(bets, &space);
        Ok(OutcomeModel { space, incidence })
    }

    /// Find the allocation of `bankroll` over `bets` maximizing the
    /// guaranteed net.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] for invalid input, when the minimum stakes
    /// do not fit the bankroll, and for every solver termination other than
    /// an optimal or integer-feasible point.
    pub fn solve(
        &self,
        bets: &[Bet],
        bankroll: Decimal,
        events: Option<usize>,
        options: &SolveOptions,
    ) -> SolveResult {
        if bets.is_empty() {
            return Err(AllocationError::NoBets);
        }
        let increment = options.increment;
        if increment <= Decimal::ZERO {
            return Err(AllocationError::InvalidIncrement { increment });
        }

        let model = self.outcome_model(bets, events)?;

        let out_of_range = AllocationError::IncrementOutOfRange { increment, bankroll };
        let min_units: Vec<i64> = bets
            .iter()
            .map(|b| b.min_units(increment))
            .collect::<Option<_>>()
            .ok_or_else(|| out_of_range.clone())?;
        let total_min_units = min_units.iter().fold(0_i64, |acc, u| acc.saturating_add(*u));
        let total_min_required = Decimal::from(total_min_units)
            .checked_mul(increment)
            .unwrap_or(Decimal::MAX);
        if total_min_required > bankroll {
            warn!(
                total_min_required = %total_min_required,
                bankroll = %bankroll,
                "Bankroll cannot cover minimum stakes"
            );
            return Err(AllocationError::InsufficientBankrollForMinimums {
                total_min_required,
                bankroll,
            });
        }

        info!(
            bets = bets.len(),
            events = model.space.events(),
            outcomes = model.space.len(),
            bankroll = %bankroll,
            increment = %increment,
            budget = ?options.budget,
            backend = self.solver.name(),
            "Solving allocation"
        );

        let problem = build_problem(bets, bankroll, &min_units, &model, options)
            .ok_or(out_of_range)?;
        let lp_solution = self
            .solver
            .solve_ilp(&problem)
            .map_err(|e| AllocationError::SolverFailure {
                reason: e.to_string(),
            })?;

        let status = match lp_solution.status {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            SolutionStatus::Feasible => SolveStatus::Feasible,
            SolutionStatus::TimedOut => {
                warn!(limit = ?options.time_limit, "Allocation solve timed out");
                return Err(AllocationError::Timeout {
                    limit_secs: options.time_limit.map(|d| d.as_secs_f64()),
                });
            }
            SolutionStatus::Infeasible | SolutionStatus::Unbounded => {
                warn!(status = lp_solution.status.as_str(), "Allocation program has no solution");
                return Err(AllocationError::Infeasible {
                    solver_status: lp_solution.status.as_str().to_string(),
                });
            }
            SolutionStatus::Error => {
                return Err(AllocationError::SolverFailure {
                    reason: lp_solution
                        .message
                        .unwrap_or_else(|| SolutionStatus::Error.as_str().to_string()),
                });
            }
        };

        let units: BTreeMap<_, i64> = bets
            .iter()
            .zip(&lp_solution.values)
            .map(|(bet, value)| (bet.id().clone(), value.round().to_i64().unwrap_or(0)))
            .collect();
        let stakes: Allocation = units
            .iter()
            .map(|(id, u)| (id.clone(), Decimal::from(*u) * increment))
            .collect();
        let total_stakes = stakes.total();

        let scenarios = evaluate_scenarios(
            bets,
            &stakes,
            &UpdatedOdds::new(),
            &model.space,
            &model.incidence,
        );
        let guaranteed_net = worst_net(&scenarios);

        if let Some(reported) = lp_solution.values.get(bets.len()) {
            let drift = (*reported - guaranteed_net).abs();
            if drift > Decimal::new(1, 4) {
                debug!(
                    reported = %reported,
                    recomputed = %guaranteed_net,
                    "Solver objective differs from recomputed guaranteed net"
                );
            }
        }

        info!(
            status = ?status,
            total_stakes = %total_stakes,
            guaranteed_net = %guaranteed_net,
            "Allocation solved"
        );

        Ok(Solution {
            status,
            risk_metrics: RiskMetrics::from_scenarios(&scenarios),
            market: MarketEvaluation::evaluate(bets),
            stakes,
            units,
            total_stakes,
            guaranteed_net,
            scenarios,
        })
    }
}

/// Assemble the ILP. Variables are `z_0..z_{n-1}` followed by `R`.
///
/// `None` when a coefficient or the budget target overflows `Decimal`.
fn build_problem(
    bets: &[Bet],
    bankroll: Decimal,
    min_units: &[i64],
    model: &OutcomeModel,
    options: &SolveOptions,
) -> Option<IlpProblem> {
    let n = bets.len();
    let increment = options.increment;
    let mut lp = LpProblem::new(n + 1);

    // minimize -R
    lp.objective[n] = -Decimal::ONE;
    for (bound, units) in lp.bounds.iter_mut().zip(min_units) {
        *bound = VariableBounds::at_least(Decimal::from(*units));
    }
    lp.bounds[n] = VariableBounds::free();

    let payouts: Vec<Decimal> = bets
        .iter()
        .map(|bet| increment.checked_mul(bet.odds()))
        .collect::<Option<_>>()?;

    // Σ inc·odds·I·z − R ≥ S
    for w in 0..model.space.len() {
        let mut coefficients: Vec<Decimal> = payouts
            .iter()
            .enumerate()
            .map(|(i, payout)| {
                if model.incidence.wins(i, w) {
                    *payout
                } else {
                    Decimal::ZERO
                }
            })
            .collect();
        coefficients.push(-Decimal::ONE);
        lp.constraints
            .push(Constraint::at_least(format!("outcome_{w}"), coefficients, bankroll));
    }

    let mut budget = vec![increment; n];
    budget.push(Decimal::ZERO);
    match options.budget {
        BudgetMode::Exact => {
            let target = bankroll.checked_div(increment)?.floor() * increment;
            lp.constraints.push(Constraint::equal("budget", budget, target));
        }
        BudgetMode::ExactStrict => {
            lp.constraints.push(Constraint::at_most(
                "budget_upper",
                budget.clone(),
                bankroll + BUDGET_TOLERANCE,
            ));
            lp.constraints.push(Constraint::at_least(
                "budget_lower",
                budget,
                bankroll - BUDGET_TOLERANCE,
            ));
        }
        BudgetMode::AtMost => {
            lp.constraints.push(Constraint::at_most(
                "budget",
                budget,
                bankroll + BUDGET_TOLERANCE,
            ));
        }
    }

    Some(IlpProblem::new(lp, (0..n).collect()).with_time_limit(options.time_limit))
}
