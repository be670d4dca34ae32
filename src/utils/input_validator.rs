// ============================================================================
// Input Validation
// Turns raw user text into operations and bounded decimal operands
// ============================================================================
//
// Validation errors are distinct from operation errors: they reject input
// before any calculation is attempted.
//
// # Usage
//
// ```ignore
// use calc_record::utils::InputValidator;
// use calc_record::domain::CalculatorConfig;
//
// let config = CalculatorConfig::new();
// let op = InputValidator::validate_operation("Divide")?;
// let value = InputValidator::validate_operand(" 12.5 ", &config)?;
// ```
// ============================================================================

use crate::domain::{CalculatorConfig, Operation};
use crate::errors::{CalcResult, CalculatorError};
use crate::numeric::{self, NumericError};
use rust_decimal::Decimal;

/// Validates raw calculator input.
pub struct InputValidator;

impl InputValidator {
    /// Parse an operand, enforcing `config.max_input_value` on its magnitude.
    ///
    /// # Errors
    /// Returns a validation error for non-decimal text or an out-of-range value.
    pub fn validate_operand(text: &str, config: &CalculatorConfig) -> CalcResult<Decimal> {
        let text = text.trim();
        let value = numeric::parse_decimal(text).map_err(|err| match err {
            NumericError::InvalidInput => {
                CalculatorError::Validation(format!("invalid number: '{}'", text))
            },
            _ => CalculatorError::Validation(format!(
                "number '{}' is out of decimal range (max {})",
                text,
                Decimal::MAX
            )),
        })?;

        if let Some(max) = config.max_input_value {
            if value.abs() > max {
                return Err(CalculatorError::Validation(format!(
                    "value {} exceeds maximum allowed value of {}",
                    value, max
                )));
            }
        }

        Ok(value)
    }

    /// Resolve an operation name, ignoring surrounding whitespace and case.
    ///
    /// # Errors
    /// Returns a validation error for an unknown name.
    pub fn validate_operation(text: &str) -> CalcResult<Operation> {
        let name = text.trim().to_ascii_lowercase();
        Operation::from_tag(&name).ok_or_else(|| {
            CalculatorError::Validation(format!("unknown operation: '{}'", text.trim()))
        })
    }
}
