// ============================================================================
// Calculation Record Library
// Immutable arithmetic records over exact decimals with key-value round-tripping
// ============================================================================

//! # Calculation Record
//!
//! A single value object describing one completed arithmetic operation.
//!
//! ## Features
//!
//! - **Six operations**: add, subtract, multiply, divide, power, root
//! - **Exact decimal operands** via `rust_decimal`; power and root go through `f64`
//! - **Eager evaluation**: a record either holds its result or was never built
//! - **Key-value persistence** with recomputation and integrity checks on restore
//! - **JSON encoding** of the stored form (`serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use calc_record::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let calc = CalculationRecord::create("divide", Decimal::from(1), Decimal::from(3)).unwrap();
//! assert_eq!(calc.format_result(2), "0.33");
//!
//! let stored = calc.serialize();
//! assert_eq!(stored["operation"], "divide");
//!
//! let restored = CalculationRecord::deserialize(&stored).unwrap();
//! assert_eq!(restored, calc);
//!
//! let err = CalculationRecord::create("divide", Decimal::from(10), Decimal::ZERO).unwrap_err();
//! assert_eq!(err.to_string(), "operation error: cannot divide by zero");
//! ```

pub mod domain;
pub mod errors;
pub mod interfaces;
pub mod numeric;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        CalculationData, CalculationRecord, CalculatorConfig, IntegrityPolicy, Operation,
        DEFAULT_PRECISION,
    };
    pub use crate::errors::{CalcResult, CalculatorError, OperationError};
    pub use crate::interfaces::{
        IntegrityEvent, IntegrityHandler, LoggingIntegrityHandler, NoOpIntegrityHandler,
    };
    pub use crate::utils::InputValidator;
}
