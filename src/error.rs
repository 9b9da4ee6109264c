use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Reasons an allocation could not be produced.
///
/// Serialized with a `status` tag so the API layer can forward it as a
/// structured result.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum AllocationError {
    #[error("no bets to allocate")]
    NoBets,

    #[error("stake increment must be positive, got {increment}")]
    InvalidIncrement { increment: Decimal },

    #[error("stake increment {increment} cannot express bankroll {bankroll} in whole units")]
    IncrementOutOfRange { increment: Decimal, bankroll: Decimal },

    #[error("bet {bet_id} references event {event} but only {events} events are modelled")]
    EventIndexOutOfRange {
        bet_id: String,
        event: usize,
        events: usize,
    },

    #[error("bet {bet_id} covers unknown outcome {label}")]
    UnknownOutcome { bet_id: String, label: String },

    #[error("outcome space for {events} events exceeds the limit of {limit} outcomes")]
    OutcomeSpaceTooLarge { events: usize, limit: usize },

    #[error("bankroll {bankroll} is below the {total_min_required} required by minimum stakes")]
    InsufficientBankrollForMinimums {
        total_min_required: Decimal,
        bankroll: Decimal,
    },

    #[error("allocation program is {solver_status}")]
    Infeasible { solver_status: String },

    #[error("solver failed: {reason}")]
    SolverFailure { reason: String },

    #[error("solver hit its time limit")]
    Timeout { limit_secs: Option<f64> },
}

impl AllocationError {
    /// Stable status label, matching the serialized `status` tag.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::NoBets => "NoBets",
            Self::InvalidIncrement { .. } => "InvalidIncrement",
            Self::IncrementOutOfRange { .. } => "IncrementOutOfRange",
            Self::EventIndexOutOfRange { .. } => "EventIndexOutOfRange",
            Self::UnknownOutcome { .. } => "UnknownOutcome",
            Self::OutcomeSpaceTooLarge { .. } => "OutcomeSpaceTooLarge",
            Self::InsufficientBankrollForMinimums { .. } => "InsufficientBankrollForMinimums",
            Self::Infeasible { .. } => "Infeasible",
            Self::SolverFailure { .. } => "SolverFailure",
            Self::Timeout { .. } => "Timeout",
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("solver backend error: {0}")]
    Solver(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn allocation_error_serializes_with_status_tag() {
        let err = AllocationError::InsufficientBankrollForMinimums {
            total_min_required: dec!(15),
            bankroll: dec!(10),
        };
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["status"], "InsufficientBankrollForMinimums");
        assert_eq!(json["total_min_required"], "15");
        assert_eq!(err.status(), "InsufficientBankrollForMinimums");
    }
}
