use std::fmt::Debug;
use std::ops::{Add, AddAssign, Neg, Sub};

use num_complex::Complex;

/// Arithmetic the Farrow structures need from a sample type
///
/// Implemented for real (`f32`, `f64`) and complex (`Complex<f32>`,
/// `Complex<f64>`) samples. Coefficient formulas only ever scale samples
/// by small real constants and by powers of the fractional offset, so
/// a real `scale` is enough; no sample-by-sample product is required.
pub trait Sample:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiply by a real factor
    fn scale(self, factor: f64) -> Self;

    /// Complex conjugate (identity for real samples)
    fn conj(self) -> Self;
}

impl Sample for f32 {
    fn zero() -> Self {
        0.0
    }

    fn scale(self, factor: f64) -> Self {
        self * factor as f32
    }

    fn conj(self) -> Self {
        self
    }
}

impl Sample for f64 {
    fn zero() -> Self {
        0.0
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn conj(self) -> Self {
        self
    }
}

impl Sample for Complex<f32> {
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }

    fn scale(self, factor: f64) -> Self {
        self * factor as f32
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

impl Sample for Complex<f64> {
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}
