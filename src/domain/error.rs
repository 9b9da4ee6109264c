//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and other helpers
//! that validate domain rules before any optimization runs.
//!
//! # Examples
//!
//! ```
//! use hedgeline::domain::bet::Bet;
//! use hedgeline::domain::error::DomainError;
//! use rust_decimal_macros::dec;
//!
//! // Odds of 1.0 or below can never return a profit
//! let result = Bet::try_new("H", 0, ["H"], dec!(1.00), dec!(1));
//!
//! assert!(matches!(result, Err(DomainError::OddsTooLow { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A bet must cover at least one outcome.
    #[error("bet {bet_id} covers no outcomes")]
    EmptyCoverage {
        /// Offending bet.
        bet_id: String,
    },

    /// Decimal odds must be strictly greater than 1.
    #[error("bet {bet_id} has odds {odds}, must be greater than 1")]
    OddsTooLow {
        /// Offending bet.
        bet_id: String,
        /// The invalid odds.
        odds: Decimal,
    },

    /// Minimum stakes cannot be negative.
    #[error("bet {bet_id} has negative minimum stake {min_stake}")]
    NegativeMinStake {
        /// Offending bet.
        bet_id: String,
        /// The invalid minimum stake.
        min_stake: Decimal,
    },

    /// An outcome alphabet needs at least one label and no duplicates.
    #[error("invalid outcome alphabet: {reason}")]
    InvalidAlphabet {
        /// Why the alphabet was rejected.
        reason: &'static str,
    },

    /// Smoothing factor must lie in `[0, 1]`.
    #[error("smoothing factor {lambda} must be between 0 and 1")]
    InvalidSmoothingFactor {
        /// The invalid factor.
        lambda: Decimal,
    },
}
