//! Linear constraint types for the allocation program.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named linear constraint: `sum(coefficients[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Label used in solver diagnostics, e.g. `outcome_4` or `budget`.
    pub name: String,
    /// Coefficient per variable, aligned with the problem's variable order.
    pub coefficients: Vec<Decimal>,
    pub sense: ConstraintSense,
    pub rhs: Decimal,
}

impl Constraint {
    /// `lhs >= rhs`.
    pub fn at_least(name: impl Into<String>, coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            name: name.into(),
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// `lhs <= rhs`.
    pub fn at_most(name: impl Into<String>, coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            name: name.into(),
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// `lhs == rhs`.
    pub fn equal(name: impl Into<String>, coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            name: name.into(),
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<Decimal>,
    /// Upper bound (None = +infinity).
    pub upper: Option<Decimal>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Free variable (no bounds).
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// `[lower, +inf)`.
    #[must_use]
    pub const fn at_least(lower: Decimal) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }
}
