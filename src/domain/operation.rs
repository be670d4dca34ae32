// ============================================================================
// Operation
// The six arithmetic operations and their evaluation rules
// ============================================================================

use crate::errors::{CalcResult, OperationError};
use crate::numeric;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arithmetic operation applied by a calculation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Fails on a zero divisor
    Divide,
    /// Evaluated through f64; fails on a negative exponent
    Power,
    /// `operand1 ^ (1 / operand2)` through f64; fails on a negative base or zero degree
    Root,
}

impl Operation {
    /// Every operation, in tag order.
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Root,
    ];

    /// The textual tag used in stored records.
    pub const fn tag(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Root => "root",
        }
    }

    /// Look up an operation by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    /// Apply the operation to two operands.
    ///
    /// # Errors
    /// - `DivisionByZero` for divide with a zero divisor
    /// - `NegativeExponent` for power with a negative exponent
    /// - `NegativeRoot` for root with a negative base or zero degree
    /// - `CalculationFailed` for any other arithmetic fault
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
        let value = match self {
            Operation::Add => numeric::checked_add(lhs, rhs)?,
            Operation::Subtract => numeric::checked_sub(lhs, rhs)?,
            Operation::Multiply => numeric::checked_mul(lhs, rhs)?,
            Operation::Divide => {
                if rhs.is_zero() {
                    return Err(OperationError::DivisionByZero.into());
                }
                numeric::checked_div(lhs, rhs)?
            },
            Operation::Power => {
                if rhs < Decimal::ZERO {
                    return Err(OperationError::NegativeExponent.into());
                }
                numeric::float_powf(lhs, numeric::to_float(rhs)?)?
            },
            Operation::Root => {
                if lhs < Decimal::ZERO || rhs.is_zero() {
                    return Err(OperationError::NegativeRoot.into());
                }
                numeric::float_powf(lhs, 1.0 / numeric::to_float(rhs)?)?
            },
        };
        Ok(value)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| OperationError::InvalidOperation(s.to_string()))
    }
}
