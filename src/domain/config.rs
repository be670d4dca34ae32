// ============================================================================
// Calculator Configuration
// Formatting precision, input bounds and stored-result integrity policy
// ============================================================================

use crate::errors::{CalcResult, CalculatorError};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of decimal places used when formatting results
pub const DEFAULT_PRECISION: u32 = 10;

/// Largest scale a decimal can carry
pub const MAX_PRECISION: u32 = crate::numeric::MAX_SCALE;

// ============================================================================
// Integrity Policy
// ============================================================================

/// What to do when a stored result disagrees with the recomputed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntegrityPolicy {
    /// Keep the record and report the mismatch
    /// - Tolerates drift in historical data (e.g. float changes between versions)
    #[default]
    Warn,

    /// Refuse the record with an operation error
    /// - Use when stored data must be trusted verbatim
    Reject,
}

// ============================================================================
// Calculator Configuration
// ============================================================================

/// Settings shared by input validation, formatting and record restoration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    /// Decimal places used by `CalculationRecord::format_with`
    pub precision: u32,

    /// Optional: Largest accepted absolute operand value
    /// None means no bound beyond the decimal range
    pub max_input_value: Option<Decimal>,

    /// Handling of stored results that do not match on restore
    pub integrity_policy: IntegrityPolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_input_value: None,
            integrity_policy: IntegrityPolicy::Warn,
        }
    }

    /// Builder method: Set formatting precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set maximum absolute operand value
    pub fn with_max_input_value(mut self, max: Decimal) -> Self {
        self.max_input_value = Some(max);
        self
    }

    /// Builder method: Set integrity policy
    pub fn with_integrity_policy(mut self, policy: IntegrityPolicy) -> Self {
        self.integrity_policy = policy;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns a configuration error when the precision exceeds the decimal
    /// scale limit or the input bound is not positive.
    pub fn validate(&self) -> CalcResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(CalculatorError::Configuration(format!(
                "precision {} exceeds maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }

        if let Some(max) = self.max_input_value {
            if max <= Decimal::ZERO {
                return Err(CalculatorError::Configuration(
                    "maximum input value must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl CalculatorConfig {
    /// Strict configuration
    /// - Rejects restored records whose stored result does not match
    pub fn strict() -> Self {
        Self::new().with_integrity_policy(IntegrityPolicy::Reject)
    }
}
