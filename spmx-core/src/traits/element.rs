//! Matrix element type constraints
//!
//! This module defines the element domain: the algebraic operations a type
//! must support to be stored in a sparse matrix.

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, DivAssign, Mul, MulAssign, SubAssign};

/// Scalar kinds an element can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// 32-bit floating point
    F32 = 0,
    /// 64-bit floating point
    F64 = 1,
    /// 32-bit signed integer
    I32 = 2,
    /// 64-bit signed integer
    I64 = 3,
    /// 32-bit unsigned integer
    U32 = 4,
    /// 64-bit unsigned integer
    U64 = 5,
}

impl DataType {
    /// Matrix Market field name for this data type
    pub const fn market_field(self) -> &'static str {
        match self {
            DataType::F32 | DataType::F64 => "real",
            DataType::I32 | DataType::I64 | DataType::U32 | DataType::U64 => "integer",
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

/// Trait for types that can be stored as matrix elements
///
/// An element supports in-place addition/subtraction and
/// multiplication/division, and has a magnitude convertible to a real
/// number. The magnitude drives tolerance filtering and every norm.
pub trait MatrixElement:
    Copy
    + PartialEq
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Additive identity
    const ZERO: Self;

    /// Get the DataType representation for this element type
    fn data_type() -> DataType;

    /// Absolute value as a real number
    fn magnitude(self) -> f64;

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert from f64, or `None` if the value has no exact counterpart
    ///
    /// Floating point types round to nearest. Integer types reject
    /// fractional, non-finite and out-of-range values.
    fn from_f64_exact(value: f64) -> Option<Self>;

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;
}

#[inline]
fn abs_f64(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

impl MatrixElement for f32 {
    const ZERO: Self = 0.0;

    fn data_type() -> DataType {
        DataType::F32
    }

    fn magnitude(self) -> f64 {
        abs_f64(self as f64)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        Some(value as f32)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for f64 {
    const ZERO: Self = 0.0;

    fn data_type() -> DataType {
        DataType::F64
    }

    fn magnitude(self) -> f64 {
        abs_f64(self)
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        Some(value)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl MatrixElement for i32 {
    const ZERO: Self = 0;

    fn data_type() -> DataType {
        DataType::I32
    }

    fn magnitude(self) -> f64 {
        self.unsigned_abs() as f64
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        // Exclusive bound at MAX + 1
        let in_range = value >= i32::MIN as f64 && value < i32::MAX as f64 + 1.0;
        let cast = value as i32;
        (in_range && cast as f64 == value).then_some(cast)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i64 {
    const ZERO: Self = 0;

    fn data_type() -> DataType {
        DataType::I64
    }

    fn magnitude(self) -> f64 {
        self.unsigned_abs() as f64
    }

    fn from_f64(value: f64) -> Self {
        value as i64
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        // Exclusive bound at MAX + 1
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64 + 1.0;
        let cast = value as i64;
        (in_range && cast as f64 == value).then_some(cast)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u32 {
    const ZERO: Self = 0;

    fn data_type() -> DataType {
        DataType::U32
    }

    fn magnitude(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as u32
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        // Exclusive bound at MAX + 1
        let in_range = value >= u32::MIN as f64 && value < u32::MAX as f64 + 1.0;
        let cast = value as u32;
        (in_range && cast as f64 == value).then_some(cast)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u64 {
    const ZERO: Self = 0;

    fn data_type() -> DataType {
        DataType::U64
    }

    fn magnitude(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as u64
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        // Exclusive bound at MAX + 1
        let in_range = value >= u64::MIN as f64 && value < u64::MAX as f64 + 1.0;
        let cast = value as u64;
        (in_range && cast as f64 == value).then_some(cast)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!((-2.5f64).magnitude(), 2.5);
        assert_eq!(3.0f32.magnitude(), 3.0);
        assert_eq!((-7i32).magnitude(), 7.0);
        assert_eq!(i64::MIN.magnitude(), 9_223_372_036_854_775_808.0);
        assert_eq!(4u32.magnitude(), 4.0);
    }

    #[test]
    fn test_market_field() {
        assert_eq!(f64::data_type().market_field(), "real");
        assert_eq!(i32::data_type().market_field(), "integer");
        assert_eq!(<f32 as MatrixElement>::ZERO, 0.0);
    }

    #[test]
    fn test_from_f64_exact() {
        assert_eq!(i32::from_f64_exact(-7.0), Some(-7));
        assert_eq!(i32::from_f64_exact(2.7), None);
        assert_eq!(i32::from_f64_exact(f64::NAN), None);
        assert_eq!(i32::from_f64_exact(2_147_483_648.0), None);
        assert_eq!(u32::from_f64_exact(-3.0), None);
        assert_eq!(u64::from_f64_exact(18_446_744_073_709_551_616.0), None);
        assert_eq!(i64::from_f64_exact(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(i64::from_f64_exact(9_223_372_036_854_775_808.0), None);
        assert_eq!(f32::from_f64_exact(0.1), Some(0.1f32));
        assert_eq!(f64::from_f64_exact(-2.5), Some(-2.5));
    }
}
