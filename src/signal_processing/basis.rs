//! Polynomial bases for the Farrow interpolator
//!
//! Each basis is a closed-form rewrite of Lagrange interpolation over a
//! few neighbouring taps, with the common denominator pulled out so the
//! coefficients only need small integer multiples of the tap values. The
//! interpolant is therefore scaled by [`Basis::gain`].
//!
//! Reference: L. Erup, F. M. Gardner, R. A. Harris, "Interpolation in
//! Digital Modems - Part II", IEEE Trans. Comm., June 1993.
//!
//! Taps are indexed most recent first (`z[0]` is the newest sample). The
//! fractional offset runs from the older end of the interpolation
//! interval (offset 0) towards the newer end (offset 1).

use serde::{Deserialize, Serialize};

use crate::error::{FarrowError, Result};
use crate::signal_processing::Sample;

/// Coefficient derivation: reads the tap history, writes the coefficients.
pub type Formula<T> = fn(&[T], &mut [T]);

/// Interpolation polynomial used to derive Farrow coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Two-point linear interpolation between `z[1]` and `z[0]`
    Linear,
    /// Three-point Lagrange parabola between `z[1]` and `z[0]`
    Square,
    /// Four-point piecewise parabola (alpha = 0.5) between `z[2]` and `z[1]`
    Parabolic,
    /// Four-point Lagrange cubic between `z[2]` and `z[1]`
    Cubic,
    /// Fourth-order slot; no coefficient formula is defined for it
    Quartic,
}

impl Basis {
    /// Default basis for an interpolator order
    ///
    /// # Errors
    /// Returns `FarrowError::InvalidOrder` unless `order` is 1, 2, 3 or 4
    pub fn for_order(order: usize) -> Result<Self> {
        match order {
            1 => Ok(Basis::Linear),
            2 => Ok(Basis::Parabolic),
            3 => Ok(Basis::Cubic),
            4 => Ok(Basis::Quartic),
            _ => Err(FarrowError::InvalidOrder(order)),
        }
    }

    /// Interpolator order this basis occupies
    pub fn order(self) -> usize {
        match self {
            Basis::Linear => 1,
            Basis::Square | Basis::Parabolic => 2,
            Basis::Cubic => 3,
            Basis::Quartic => 4,
        }
    }

    /// Number of polynomial coefficients, `order() + 1`
    pub fn num_terms(self) -> usize {
        self.order() + 1
    }

    /// Factor by which the closed-form coefficients scale the interpolant
    ///
    /// Dividing an evaluated output by this value yields the true
    /// interpolated sample.
    pub fn gain(self) -> f64 {
        match self {
            Basis::Linear => 1.0,
            Basis::Square | Basis::Parabolic => 2.0,
            Basis::Cubic => 6.0,
            // 5-point Lagrange common denominator
            Basis::Quartic => 24.0,
        }
    }

    /// Index of the newer tap of the interpolation interval
    ///
    /// An output at offset `mu` lies `latency() + 1 - mu` samples behind
    /// the newest input.
    pub fn latency(self) -> usize {
        match self {
            Basis::Linear | Basis::Square => 0,
            Basis::Parabolic | Basis::Cubic => 1,
            Basis::Quartic => 2,
        }
    }

    /// Coefficient formula, or `None` when the basis has none
    pub fn formula<T: Sample>(self) -> Option<Formula<T>> {
        match self {
            Basis::Linear => Some(linear::<T> as Formula<T>),
            Basis::Square => Some(square::<T> as Formula<T>),
            Basis::Parabolic => Some(parabolic::<T> as Formula<T>),
            Basis::Cubic => Some(cubic::<T> as Formula<T>),
            Basis::Quartic => None,
        }
    }

    /// Like [`Basis::formula`] but reports the missing formula as an error
    ///
    /// # Errors
    /// Returns `FarrowError::UnimplementedOrderFormula` for `Basis::Quartic`
    pub fn require_formula<T: Sample>(self) -> Result<Formula<T>> {
        self.formula()
            .ok_or(FarrowError::UnimplementedOrderFormula(self.order()))
    }
}

fn linear<T: Sample>(z: &[T], c: &mut [T]) {
    c[1] = z[0] - z[1];
    c[0] = z[1];
}

fn square<T: Sample>(z: &[T], c: &mut [T]) {
    c[2] = z[0] - z[1].scale(2.0) + z[2];
    c[1] = z[0] - z[2];
    c[0] = z[1].scale(2.0);
}

fn parabolic<T: Sample>(z: &[T], c: &mut [T]) {
    c[2] = z[0] - z[1] - z[2] + z[3];
    c[1] = -z[0] + z[1].scale(3.0) - z[2] - z[3];
    c[0] = z[2].scale(2.0);
}

fn cubic<T: Sample>(z: &[T], c: &mut [T]) {
    c[3] = -z[3] + z[2].scale(3.0) - z[1].scale(3.0) + z[0];
    c[2] = z[3].scale(3.0) - z[2].scale(6.0) + z[1].scale(3.0);
    c[1] = z[3].scale(-2.0) - z[2].scale(3.0) + z[1].scale(6.0) - z[0];
    c[0] = z[2].scale(6.0);
}
