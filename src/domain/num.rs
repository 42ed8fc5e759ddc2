//! Numeric scalar abstraction.
//!
//! Indicator and rule arithmetic is generic over [`Num`] so the same logic
//! runs on `f64` or on `rust_decimal::Decimal` without modification. The
//! trait exposes only what the evaluators use: the four arithmetic operators,
//! ordering, a zero element, absolute value, and conversions from integer
//! counts and literals.

use rust_decimal::Decimal;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

pub trait Num:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    fn zero() -> Self;

    /// Lossless conversion from a count (lookback lengths, divisors).
    fn from_usize(value: usize) -> Self;

    /// Conversion from a literal. `None` when the backing cannot represent
    /// the value (non-finite floats, decimals out of range).
    fn from_f64(value: f64) -> Option<Self>;

    fn abs(self) -> Self;

    fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

impl Num for f64 {
    fn zero() -> Self {
        0.0
    }

    fn from_usize(value: usize) -> Self {
        value as f64
    }

    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}

impl Num for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn from_usize(value: usize) -> Self {
        Decimal::from(value as u64)
    }

    fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64_retain(value)
    }

    fn abs(self) -> Self {
        Decimal::abs(&self)
    }
}
