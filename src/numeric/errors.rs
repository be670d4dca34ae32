// ============================================================================
// Numeric Errors
// Arithmetic faults raised while evaluating an operation
// ============================================================================

use std::fmt;

/// Faults that can occur while evaluating decimal or floating arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the decimal range
    Overflow,
    /// Non-zero result too small for 28 decimal places
    Underflow,
    /// Exact result needs more digits than a decimal holds
    PrecisionLoss,
    /// Attempted division by zero
    DivisionByZero,
    /// Decimal operand has no finite f64 counterpart
    NotRepresentable,
    /// Floating result was NaN or infinite
    NonFinite,
    /// Input string is not a decimal number
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded decimal range")
            },
            NumericError::Underflow => write!(
                f,
                "arithmetic underflow: result smaller than 28 decimal places allow"
            ),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: exact result needs more than 28 decimal places or 96 bits"
            ),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::NotRepresentable => {
                write!(f, "operand cannot be represented as a float")
            },
            NumericError::NonFinite => write!(f, "result is not a finite number"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
