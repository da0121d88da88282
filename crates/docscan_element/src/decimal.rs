//! Exact decimal values.

use crate::Int;

/// Largest scale a `rust_decimal::Decimal` can carry.
const NATIVE_MAX_SCALE: u32 = 28;

/// An exact decimal `coefficient × 10^exponent`.
///
/// Decimals keep the precision they were written with (`1.0` and `1.00` are
/// distinct) and can represent negative zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal<'a> {
    pub coefficient: Int<'a>,
    pub exponent: i32,
    negative_zero: bool,
}

impl<'a> Decimal<'a> {
    pub const fn new(coefficient: Int<'a>, exponent: i32) -> Self {
        Self {
            coefficient,
            exponent,
            negative_zero: false,
        }
    }

    /// Creates `-0` with the given exponent.
    pub const fn negative_zero(exponent: i32) -> Self {
        Self {
            coefficient: Int::I64(0),
            exponent,
            negative_zero: true,
        }
    }

    pub const fn is_negative_zero(&self) -> bool {
        self.negative_zero
    }

    /// Converts to a native `rust_decimal::Decimal`.
    ///
    /// Returns `None` when the value needs more than 96 bits of mantissa or a
    /// scale above 28.
    pub fn to_native(&self) -> Option<rust_decimal::Decimal> {
        let coefficient = match self.coefficient {
            Int::I64(v) => i128::from(v),
            Int::Big { .. } => i128::try_from(&self.coefficient.to_bigint()).ok()?,
        };

        let mut native = if self.exponent <= 0 {
            let scale = self.exponent.unsigned_abs();
            if scale > NATIVE_MAX_SCALE {
                return None;
            }
            rust_decimal::Decimal::try_from_i128_with_scale(coefficient, scale).ok()?
        } else {
            let factor = 10i128.checked_pow(self.exponent.unsigned_abs())?;
            let scaled = coefficient.checked_mul(factor)?;
            rust_decimal::Decimal::try_from_i128_with_scale(scaled, 0).ok()?
        };

        if self.negative_zero {
            native.set_sign_negative(true);
        }
        Some(native)
    }
}

/// Formats as `<coefficient>d<exponent>`.
impl std::fmt::Display for Decimal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative_zero {
            f.write_str("-")?;
        }
        write!(f, "{}d{}", self.coefficient, self.exponent)
    }
}
