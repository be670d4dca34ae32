// ============================================================================
// Float Bridge
// Checked decimal arithmetic, decimal text parsing and the binary-float
// detour used by power/root
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::exact;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits printed when expanding an f64. Every f64 at or above
/// 1e-30 has a terminating expansion within this many places.
const FLOAT_EXPANSION_DIGITS: usize = 160;

/// Exponents beyond this are not expanded into plain text.
const MAX_TEXT_EXPONENT: i64 = 1_000;

// ============================================================================
// Exact Decimal Arithmetic
// ============================================================================

fn inexact(value: Decimal) -> NumericError {
    if value.is_zero() {
        NumericError::Underflow
    } else {
        NumericError::PrecisionLoss
    }
}

/// Checked exact addition.
///
/// # Errors
/// - `Overflow` if the sum leaves the decimal range
/// - `PrecisionLoss` if the exact sum would have to be rounded
#[inline]
pub fn checked_add(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    let sum = lhs.checked_add(rhs).ok_or(NumericError::Overflow)?;
    if !exact::sum_is_exact(lhs, rhs, false) {
        return Err(inexact(sum));
    }
    Ok(sum)
}

/// Checked exact subtraction.
#[inline]
pub fn checked_sub(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    let diff = lhs.checked_sub(rhs).ok_or(NumericError::Overflow)?;
    if !exact::sum_is_exact(lhs, rhs, true) {
        return Err(inexact(diff));
    }
    Ok(diff)
}

/// Checked exact multiplication.
///
/// # Errors
/// - `Overflow` if the product leaves the decimal range
/// - `Underflow` if a non-zero product rounds to zero
/// - `PrecisionLoss` if the exact product would otherwise be rounded
#[inline]
pub fn checked_mul(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    let product = lhs.checked_mul(rhs).ok_or(NumericError::Overflow)?;
    if !exact::product_is_exact(lhs, rhs) {
        return Err(inexact(product));
    }
    Ok(product)
}

/// Checked division, rounded to 28 significant places.
///
/// # Errors
/// - `DivisionByZero` if `rhs` is zero
/// - `Overflow` if the quotient leaves the decimal range
/// - `Underflow` if a non-zero quotient rounds to zero
#[inline]
pub fn checked_div(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    if rhs.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    let quotient = lhs.checked_div(rhs).ok_or(NumericError::Overflow)?;
    if quotient.is_zero() && !lhs.is_zero() {
        return Err(NumericError::Underflow);
    }
    Ok(quotient)
}

// ============================================================================
// Float Conversions
// ============================================================================

/// Convert a decimal to the nearest f64.
///
/// # Errors
/// Returns `NotRepresentable` if no finite f64 exists for the value.
pub fn to_float(value: Decimal) -> NumericResult<f64> {
    value
        .to_f64()
        .filter(|f| f.is_finite())
        .ok_or(NumericError::NotRepresentable)
}

/// Convert an f64 back to a decimal from its exact binary value.
///
/// The float's full decimal expansion is rounded to 28 places, the same
/// rounding applied when that expansion is read back from stored text, so
/// `0.1_f64` comes back as `0.1000000000000000055511151231`.
///
/// # Errors
/// - `NonFinite` for NaN or infinity
/// - `Overflow` if the magnitude exceeds the decimal range
/// - `Underflow` if a non-zero float rounds to zero
pub fn from_float(value: f64) -> NumericResult<Decimal> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }
    let expansion = format!("{:.*}", FLOAT_EXPANSION_DIGITS, value);
    let expansion = expansion.trim_end_matches('0').trim_end_matches('.');
    let decimal = Decimal::from_str(expansion).map_err(|_| NumericError::Overflow)?;
    if decimal.is_zero() && value != 0.0 {
        return Err(NumericError::Underflow);
    }
    Ok(decimal)
}

/// Raise `base` to `exponent` through f64 and convert the result back.
pub fn float_powf(base: Decimal, exponent: f64) -> NumericResult<Decimal> {
    let base = to_float(base)?;
    from_float(base.powf(exponent))
}

// ============================================================================
// Text Parsing
// ============================================================================

/// Parse plain (`-12.5`) or scientific (`1.25E+1`) decimal text.
///
/// Digits past 28 decimal places are rounded, as for float expansions.
///
/// # Errors
/// - `InvalidInput` if the text is not a number
/// - `Overflow` if the number is outside the decimal range
pub fn parse_decimal(text: &str) -> NumericResult<Decimal> {
    let text = text.trim();
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(pos) => {
            let exponent: i64 = text[pos + 1..]
                .parse()
                .map_err(|_| NumericError::InvalidInput)?;
            (&text[..pos], exponent)
        },
        None => (text, 0),
    };

    let (negative, body) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(NumericError::InvalidInput);
    }

    let digits = format!("{}{}", int_part, frac_part);
    let is_zero = digits.bytes().all(|b| b == b'0');
    if exponent.abs() > MAX_TEXT_EXPONENT {
        if exponent > 0 && !is_zero {
            return Err(NumericError::Overflow);
        }
        return Ok(Decimal::ZERO);
    }

    // Shift the decimal point by the exponent
    let point = int_part.len() as i64 + exponent;
    let plain = if point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (int_digits, frac_digits) = digits.split_at(point as usize);
        format!("{}.{}", int_digits, frac_digits)
    };

    let value = Decimal::from_str(&plain).map_err(|_| NumericError::Overflow)?;
    Ok(if negative { -value } else { value })
}
