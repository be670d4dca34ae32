// ============================================================================
// Calculator Errors
// Base error kind and its validation / operation / configuration specializations
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Failures raised while building, evaluating or restoring a calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Operation tag is not one of the six known tags
    InvalidOperation(String),
    /// Divide with a zero divisor
    DivisionByZero,
    /// Power with a negative exponent
    NegativeExponent,
    /// Root of a negative base, or a zero degree
    NegativeRoot,
    /// Any other arithmetic fault during evaluation
    CalculationFailed(NumericError),
    /// Stored calculation data is missing a field or holds malformed text
    InvalidData(String),
    /// Stored result disagrees with the recomputed one under a strict policy
    ResultMismatch { stored: String, computed: String },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::InvalidOperation(tag) => write!(f, "invalid operation: {}", tag),
            OperationError::DivisionByZero => write!(f, "cannot divide by zero"),
            OperationError::NegativeExponent => {
                write!(f, "cannot calculate negative exponents")
            },
            OperationError::NegativeRoot => write!(f, "cannot calculate negative roots"),
            OperationError::CalculationFailed(cause) => {
                write!(f, "calculation failed: {}", cause)
            },
            OperationError::InvalidData(cause) => {
                write!(f, "calculation data invalid: {}", cause)
            },
            OperationError::ResultMismatch { stored, computed } => write!(
                f,
                "stored result {} does not match computed result {}",
                stored, computed
            ),
        }
    }
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OperationError::CalculationFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<NumericError> for OperationError {
    fn from(err: NumericError) -> Self {
        OperationError::CalculationFailed(err)
    }
}

/// Base error kind for the calculator.
///
/// `Validation`, `Operation` and `Configuration` are its specializations.
/// Calculation records only ever produce `Operation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// Input could not be validated
    Validation(String),
    /// An operation failed
    Operation(OperationError),
    /// Configuration is invalid
    Configuration(String),
}

impl CalculatorError {
    /// The operation error carried by this error, if any.
    pub fn as_operation(&self) -> Option<&OperationError> {
        match self {
            CalculatorError::Operation(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CalculatorError::Validation(_))
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, CalculatorError::Operation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, CalculatorError::Configuration(_))
    }
}

impl fmt::Display for CalculatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorError::Validation(msg) => write!(f, "validation error: {}", msg),
            CalculatorError::Operation(err) => write!(f, "operation error: {}", err),
            CalculatorError::Configuration(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CalculatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalculatorError::Operation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OperationError> for CalculatorError {
    fn from(err: OperationError) -> Self {
        CalculatorError::Operation(err)
    }
}

impl From<NumericError> for CalculatorError {
    fn from(err: NumericError) -> Self {
        CalculatorError::Operation(err.into())
    }
}

/// Result type alias for calculator operations
pub type CalcResult<T> = Result<T, CalculatorError>;
