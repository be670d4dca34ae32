// ============================================================================
// Numeric Module
// Checked decimal arithmetic, text parsing and float conversions
// ============================================================================
//
// This module provides:
// - NumericError: arithmetic faults raised during evaluation
// - checked_* helpers over rust_decimal::Decimal that refuse to round silently
// - parse_decimal for plain and scientific decimal text
// - The f64 round trip used by power and root
//
// Design principles:
// - Add/subtract/multiply are exact or fail
// - Decimals carry at most 28 decimal places and a 96-bit mantissa
//   (magnitude up to Decimal::MAX, about 7.9e28)
// - Power/root go through f64 and come back from the float's exact expansion
// - All arithmetic returns Result (no panics)

mod errors;
mod exact;
mod float_bridge;

pub use errors::{NumericError, NumericResult};
pub use exact::MAX_SCALE;
pub use float_bridge::{
    checked_add, checked_div, checked_mul, checked_sub, float_powf, from_float, parse_decimal,
    to_float,
};
