//! JSON request bodies for CLI commands.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

use crate::application::allocation::{BudgetMode, SolveOptions};
use crate::application::settlement::FinishedResults;
use crate::domain::allocation::Allocation;
use crate::domain::bet::{Bet, UpdatedOdds};
use crate::domain::id::OutcomeLabel;
use crate::error::Result;

/// Per-request solve overrides on top of `[solver]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolveOverrides {
    #[serde(default)]
    pub increment: Option<Decimal>,
    #[serde(default)]
    pub budget_mode: Option<BudgetMode>,
    /// Legacy switch: `false` selects `at_most`.
    #[serde(default)]
    pub enforce_exact_budget: Option<bool>,
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
}

impl SolveOverrides {
    /// Apply the overrides to `defaults`.
    #[must_use]
    pub fn apply(&self, defaults: SolveOptions) -> SolveOptions {
        let mut options = defaults;
        if let Some(increment) = self.increment {
            options = options.with_increment(increment);
        }
        if let Some(exact) = self.enforce_exact_budget {
            options = options.with_budget(if exact {
                BudgetMode::Exact
            } else {
                BudgetMode::AtMost
            });
        }
        if let Some(mode) = self.budget_mode {
            options = options.with_budget(mode);
        }
        if let Some(secs) = self.time_limit_secs {
            options = options.with_time_limit(std::time::Duration::try_from_secs_f64(secs).ok());
        }
        options
    }
}

/// Body of `hedgeline solve`.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub bets: Vec<Bet>,
    #[serde(alias = "budget")]
    pub bankroll: Decimal,
    /// Event count; inferred from the bets when absent.
    #[serde(default, alias = "k")]
    pub events: Option<usize>,
    #[serde(flatten)]
    pub overrides: SolveOverrides,
}

/// Body of `hedgeline recalibrate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecalibrateRequest {
    pub bets: Vec<Bet>,
    #[serde(alias = "current_stakes")]
    pub stakes: Allocation,
    /// Defaults to the total of `stakes`.
    #[serde(default, alias = "budget")]
    pub bankroll: Option<Decimal>,
    #[serde(default)]
    pub updated_odds: UpdatedOdds,
    #[serde(default, alias = "k")]
    pub events: Option<usize>,
    #[serde(flatten)]
    pub overrides: SolveOverrides,
}

/// Body of `hedgeline settle`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    pub bets: Vec<Bet>,
    #[serde(alias = "placed_stakes")]
    pub stakes: Allocation,
    #[serde(alias = "S_initial")]
    pub initial_bankroll: Decimal,
    /// Keyed by event index, as a JSON object with numeric string keys.
    #[serde(alias = "finished_results", deserialize_with = "event_keyed")]
    pub results: FinishedResults,
    #[serde(flatten)]
    pub overrides: SolveOverrides,
}

// Flattened bodies are buffered before parsing, which loses serde_json's
// string-to-integer key coercion.
fn event_keyed<'de, D>(deserializer: D) -> std::result::Result<FinishedResults, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, OutcomeLabel>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, label)| {
            key.trim()
                .parse::<usize>()
                .map(|event| (event, label))
                .map_err(|_| de::Error::custom(format!("event index {key:?} is not a non-negative integer")))
        })
        .collect()
}

/// Body of `hedgeline cashout`.
#[derive(Debug, Clone, Deserialize)]
pub struct CashoutRequest {
    pub bets: Vec<Bet>,
    pub stakes: Allocation,
    /// Synthesized by the configured odds source when absent.
    #[serde(default)]
    pub updated_odds: Option<UpdatedOdds>,
}

/// Body of `hedgeline smooth`.
#[derive(Debug, Clone, Deserialize)]
pub struct SmoothRequest {
    pub bets: Vec<Bet>,
    #[serde(alias = "budget")]
    pub bankroll: Decimal,
    #[serde(default, alias = "prev_stakes")]
    pub previous: Allocation,
    /// Overrides `[smoothing].lambda`.
    #[serde(default, alias = "lam")]
    pub lambda: Option<Decimal>,
    #[serde(default, alias = "k")]
    pub events: Option<usize>,
    #[serde(flatten)]
    pub overrides: SolveOverrides,
}

/// Body of `hedgeline simulate`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateRequest {
    pub bets: Vec<Bet>,
    #[serde(default)]
    pub stake: Option<Decimal>,
    #[serde(default, alias = "k")]
    pub events: Option<usize>,
    #[serde(flatten)]
    pub overrides: SolveOverrides,
}

/// Read and parse a request from `path`, or stdin when `path` is `-`.
///
/// # Errors
///
/// Fails when the input cannot be read or is not a valid request.
pub fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}
