//! Allocation solver configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::allocation::{AllocationSolver, BudgetMode, SolveOptions};
use crate::domain::error::DomainError;
use crate::domain::outcome::OutcomeAlphabet;

/// `[solver]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    /// Stake granularity.
    #[serde(default = "default_increment")]
    pub increment: Decimal,
    #[serde(default)]
    pub budget_mode: BudgetMode,
    /// Limit on each ILP solve; unbounded when absent.
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
    /// Refuse outcome spaces larger than this.
    #[serde(default = "default_max_outcomes")]
    pub max_outcomes: usize,
    /// Outcome labels shared by every event.
    #[serde(default = "default_alphabet")]
    pub alphabet: Vec<String>,
}

fn default_increment() -> Decimal {
    Decimal::ONE
}

const fn default_max_outcomes() -> usize {
    AllocationSolver::DEFAULT_MAX_OUTCOMES
}

fn default_alphabet() -> Vec<String> {
    vec!["H".into(), "D".into(), "A".into()]
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            increment: default_increment(),
            budget_mode: BudgetMode::default(),
            time_limit_secs: None,
            max_outcomes: default_max_outcomes(),
            alphabet: default_alphabet(),
        }
    }
}

impl SolverConfig {
    /// Per-call options derived from this section.
    #[must_use]
    pub fn options(&self) -> SolveOptions {
        SolveOptions::default()
            .with_increment(self.increment)
            .with_budget(self.budget_mode)
            .with_time_limit(self.time_limit())
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// # Errors
    ///
    /// Fails on an empty or duplicated alphabet.
    pub fn alphabet(&self) -> Result<OutcomeAlphabet, DomainError> {
        OutcomeAlphabet::try_new(self.alphabet.iter().map(String::as_str))
    }
}
