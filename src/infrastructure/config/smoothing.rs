//! Smoothing configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::smoothing::Smoother;
use crate::domain::error::DomainError;

/// `[smoothing]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SmoothingConfig {
    /// Weight of the new allocation, in `[0, 1]`.
    #[serde(default = "default_lambda")]
    pub lambda: Decimal,
}

fn default_lambda() -> Decimal {
    Decimal::new(2, 1)
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            lambda: default_lambda(),
        }
    }
}

impl SmoothingConfig {
    /// # Errors
    ///
    /// Fails when `lambda` is outside `[0, 1]`.
    pub fn smoother(&self) -> Result<Smoother, DomainError> {
        Smoother::new(self.lambda)
    }
}
