// ============================================================================
// Exactness Checks
// Decides whether an exact sum or product fits a decimal without rounding
// ============================================================================
//
// rust_decimal rounds silently once a result needs more than 28 decimal
// places or a mantissa wider than 96 bits. These checks rebuild the exact
// result on a 256-bit magnitude and report whether it survives.

use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Largest scale a decimal can carry
pub const MAX_SCALE: u32 = 28;

/// Unsigned 256-bit integer, little-endian 64-bit limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct U256([u64; 4]);

impl U256 {
    /// Full product of two 128-bit values.
    fn mul_u128(a: u128, b: u128) -> Self {
        let a = [a as u64, (a >> 64) as u64];
        let b = [b as u64, (b >> 64) as u64];
        let mut out = [0u64; 4];
        for i in 0..2 {
            let mut carry: u128 = 0;
            for j in 0..2 {
                let cur = out[i + j] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
                out[i + j] = cur as u64;
                carry = cur >> 64;
            }
            out[i + 2] = carry as u64;
        }
        Self(out)
    }

    /// Wrapping addition; callers stay far below 2^256.
    fn add(self, rhs: Self) -> Self {
        let mut out = [0u64; 4];
        let mut carry = 0u128;
        for (i, limb) in out.iter_mut().enumerate() {
            let cur = self.0[i] as u128 + rhs.0[i] as u128 + carry;
            *limb = cur as u64;
            carry = cur >> 64;
        }
        Self(out)
    }

    /// Subtraction; requires `self >= rhs`.
    fn sub(self, rhs: Self) -> Self {
        let mut out = [0u64; 4];
        let mut borrow = false;
        for (i, limb) in out.iter_mut().enumerate() {
            let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            *limb = diff;
            borrow = b1 || b2;
        }
        Self(out)
    }

    fn div_rem_small(self, divisor: u64) -> (Self, u64) {
        let mut out = [0u64; 4];
        let mut rem: u128 = 0;
        for i in (0..4).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            out[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        (Self(out), rem as u64)
    }

    /// Fits the 96-bit decimal mantissa.
    fn fits_mantissa(&self) -> bool {
        self.0[3] == 0 && self.0[2] == 0 && (self.0[1] >> 32) == 0
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Whether `magnitude / 10^scale` has an exact decimal representation.
fn representable(mut magnitude: U256, mut scale: u32) -> bool {
    loop {
        if scale <= MAX_SCALE && magnitude.fits_mantissa() {
            return true;
        }
        if scale == 0 {
            return false;
        }
        let (quotient, rem) = magnitude.div_rem_small(10);
        if rem != 0 {
            return false;
        }
        magnitude = quotient;
        scale -= 1;
    }
}

fn aligned(value: Decimal, scale: u32) -> U256 {
    U256::mul_u128(value.mantissa().unsigned_abs(), 10u128.pow(scale - value.scale()))
}

/// Whether `lhs + rhs` (or `lhs - rhs` when `subtract`) is exactly representable.
pub fn sum_is_exact(lhs: Decimal, rhs: Decimal, subtract: bool) -> bool {
    let scale = lhs.scale().max(rhs.scale());
    let a = aligned(lhs, scale);
    let b = aligned(rhs, scale);

    let same_sign = lhs.is_sign_negative() == (rhs.is_sign_negative() ^ subtract);
    let magnitude = if same_sign {
        a.add(b)
    } else if a.cmp_magnitude(&b) == Ordering::Less {
        b.sub(a)
    } else {
        a.sub(b)
    };

    representable(magnitude, scale)
}

/// Whether `lhs * rhs` is exactly representable.
pub fn product_is_exact(lhs: Decimal, rhs: Decimal) -> bool {
    let magnitude = U256::mul_u128(lhs.mantissa().unsigned_abs(), rhs.mantissa().unsigned_abs());
    representable(magnitude, lhs.scale() + rhs.scale())
}
