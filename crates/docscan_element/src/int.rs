//! Integer values.

use num_bigint::{BigInt, Sign};

/// Smallest representation that holds an integer without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerSize {
    /// Fits in an `i32`.
    Int,
    /// Fits in an `i64` but not an `i32`.
    Long,
    /// Needs arbitrary precision.
    BigInt,
}

/// An integer of arbitrary size.
///
/// Values that fit in an `i64` are always stored as [`Int::I64`]; the `Big`
/// variant holds a big-endian magnitude allocated in an arena (see
/// [`ElementArena::alloc_big_int`](crate::ElementArena::alloc_big_int)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int<'a> {
    I64(i64),
    Big {
        negative: bool,
        magnitude: &'a [u8],
    },
}

impl<'a> Int<'a> {
    /// Classifies the value by the narrowest type that holds it exactly.
    pub fn size(&self) -> IntegerSize {
        match self {
            Int::I64(v) if i32::try_from(*v).is_ok() => IntegerSize::Int,
            Int::I64(_) => IntegerSize::Long,
            Int::Big { .. } => IntegerSize::BigInt,
        }
    }

    /// Returns the value as an `i32` if it fits.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Int::I64(v) => i32::try_from(*v).ok(),
            Int::Big { .. } => None,
        }
    }

    /// Returns the value as an `i64` if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Int::I64(v) => Some(*v),
            Int::Big { .. } => None,
        }
    }

    /// Converts to an owned arbitrary-precision integer.
    pub fn to_bigint(&self) -> BigInt {
        match self {
            Int::I64(v) => BigInt::from(*v),
            Int::Big {
                negative,
                magnitude,
            } => {
                let sign = if *negative { Sign::Minus } else { Sign::Plus };
                BigInt::from_bytes_be(sign, magnitude)
            }
        }
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Int::I64(0))
    }
}

impl std::fmt::Display for Int<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Int::I64(v) => write!(f, "{}", v),
            Int::Big { .. } => write!(f, "{}", self.to_bigint()),
        }
    }
}
