//! Element-kind capability for array storage.
//!
//! The storage layer consumes exactly this much of a numeric type:
//! conversion to and from a 64-bit float, addition (via the
//! [`Zero`] supertrait's `Add` bound), an absolute-value magnitude, and
//! zero construction plus the small/absolute predicates derived from the
//! magnitude. Everything else about a number type is irrelevant here.
//!
//! Magnitude comparison deliberately goes through `f64` rather than any
//! natural ordering of the type, because complex numbers and quaternions
//! have none.

use std::fmt;
use std::ops::Add;

use num_complex::Complex64;
use num_rational::{BigRational, Rational64};
use num_traits::{ToPrimitive, Zero};

/// Capability bound for array element kinds.
pub trait Scalar: Clone + PartialEq + Zero + fmt::Debug + Send + Sync + 'static {
    /// Best-effort conversion from a 64-bit float.
    fn from_f64(value: f64) -> Self;

    /// Best-effort conversion to a 64-bit float.
    fn to_f64(&self) -> f64;

    /// Absolute value as a non-negative 64-bit float.
    fn magnitude(&self) -> f64;

    /// True iff the value equals its own absolute value.
    fn is_absolute(&self) -> bool;

    /// True iff this value is negligible relative to `compared_to`:
    /// adding its magnitude to `|compared_to|` does not change
    /// `|compared_to|`. With `compared_to == 0.0` only an exact zero is
    /// small.
    #[inline]
    fn is_small(&self, compared_to: f64) -> bool {
        let reference = compared_to.abs();
        reference + self.magnitude() == reference
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn magnitude(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn is_absolute(&self) -> bool {
        *self >= 0.0
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        self.re
    }

    #[inline]
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    #[inline]
    fn is_absolute(&self) -> bool {
        self.im == 0.0 && self.re >= 0.0
    }
}

/// Finite rational kind. Non-finite floats have no rational counterpart
/// and convert to zero.
impl Scalar for Rational64 {
    fn from_f64(value: f64) -> Self {
        Rational64::approximate_float(value).unwrap_or_else(Rational64::zero)
    }

    fn to_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }

    fn magnitude(&self) -> f64 {
        Scalar::to_f64(self).abs()
    }

    fn is_absolute(&self) -> bool {
        *self >= Rational64::zero()
    }
}

/// Arbitrary-precision exact kind. Non-finite floats convert to zero.
impl Scalar for BigRational {
    fn from_f64(value: f64) -> Self {
        BigRational::from_float(value).unwrap_or_else(BigRational::zero)
    }

    fn to_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }

    fn magnitude(&self) -> f64 {
        Scalar::to_f64(self).abs()
    }

    fn is_absolute(&self) -> bool {
        *self >= BigRational::zero()
    }
}

// ---------------------------------------------------------------------------
// Quaternion
// ---------------------------------------------------------------------------

/// Quaternion value with `f64` components.
///
/// Only the storage capability is implemented here; quaternion algebra
/// beyond addition belongs to consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quaternion {
    pub r: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Quaternion {
    pub const fn new(r: f64, i: f64, j: f64, k: f64) -> Self {
        Self { r, i, j, k }
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        (self.r * self.r + self.i * self.i + self.j * self.j + self.k * self.k).sqrt()
    }

    /// True iff the vector part is zero.
    pub fn is_real(&self) -> bool {
        self.i == 0.0 && self.j == 0.0 && self.k == 0.0
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.i + rhs.i,
            self.j + rhs.j,
            self.k + rhs.k,
        )
    }
}

impl Zero for Quaternion {
    #[inline]
    fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.r == 0.0 && self.is_real()
    }
}

impl Scalar for Quaternion {
    #[inline]
    fn from_f64(value: f64) -> Self {
        Self::new(value, 0.0, 0.0, 0.0)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        self.r
    }

    #[inline]
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    #[inline]
    fn is_absolute(&self) -> bool {
        self.is_real() && self.r >= 0.0
    }
}
