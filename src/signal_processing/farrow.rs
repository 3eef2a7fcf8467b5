use crate::error::{FarrowError, Result};
use crate::signal_processing::{Basis, Formula, Sample};

/// Farrow-structure fractional-delay interpolator
///
/// Keeps a short tap history of raw input samples and the polynomial
/// coefficients derived from it. Ingesting a sample and evaluating at a
/// fractional offset are separate steps, so one coefficient set can be
/// evaluated at several offsets (rephase) to produce more than one output
/// per input sample.
///
/// For order `n` the history holds `n + 2` taps and the coefficient set
/// `n + 1` terms. Outputs are scaled by the basis gain (see
/// [`Basis::gain`]); wrappers such as [`super::FractionalDelay`] divide it
/// out.
///
/// Not synchronized: every mutating call takes `&mut self`.
#[derive(Debug, Clone)]
pub struct FarrowInterpolator<T: Sample> {
    basis: Basis,
    history: Vec<T>,
    coefficients: Vec<T>,
    last_output: T,
}

impl<T: Sample> FarrowInterpolator<T> {
    /// Create an interpolator using the default basis for `order`
    ///
    /// Order 1 passes samples straight through, order 2 uses the
    /// piecewise-parabolic basis, order 3 the cubic basis. Order 4 can be
    /// constructed but has no coefficient formula, so `update` and
    /// `rephase` report `FarrowError::UnimplementedOrderFormula`.
    ///
    /// # Errors
    /// Returns `FarrowError::InvalidOrder` unless `order` is 1, 2, 3 or 4
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self::with_basis(Basis::for_order(order)?))
    }

    /// Create an interpolator with an explicit basis
    pub fn with_basis(basis: Basis) -> Self {
        let order = basis.order();
        log::debug!(
            "Farrow interpolator: basis={:?}, order={}, taps={}",
            basis,
            order,
            order + 2
        );
        Self {
            basis,
            history: vec![T::zero(); order + 2],
            coefficients: vec![T::zero(); basis.num_terms()],
            last_output: T::zero(),
        }
    }

    pub fn order(&self) -> usize {
        self.basis.order()
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Shift a new sample into the tap history without touching coefficients
    pub fn input(&mut self, sample: T) {
        let len = self.history.len();
        self.history.copy_within(0..len - 1, 1);
        self.history[0] = sample;
    }

    /// Clock in a new sample, recompute coefficients and evaluate at `offset`
    ///
    /// Order 1 returns `sample` unchanged for every offset.
    ///
    /// # Errors
    /// Returns `FarrowError::UnimplementedOrderFormula` for a basis without a
    /// coefficient formula. The sample is not ingested in that case.
    pub fn update(&mut self, sample: T, offset: f64) -> Result<T> {
        self.basis.require_formula::<T>()?;
        self.input(sample);
        self.rephase(offset)
    }

    /// Recompute coefficients from the current history and evaluate at a new
    /// offset (upsampling: call `input` once, then `rephase` per output)
    ///
    /// # Errors
    /// Returns `FarrowError::UnimplementedOrderFormula` for a basis without a
    /// coefficient formula.
    pub fn rephase(&mut self, offset: f64) -> Result<T> {
        if self.basis == Basis::Linear {
            self.last_output = self.history[0];
            return Ok(self.last_output);
        }
        self.derive_coefficients()?;
        Ok(self.evaluate(offset))
    }

    /// Run the basis formula over the current history
    ///
    /// Unlike `rephase`, the linear basis derives real interpolation
    /// coefficients here instead of passing samples through.
    ///
    /// # Errors
    /// Returns `FarrowError::UnimplementedOrderFormula` for a basis without a
    /// coefficient formula; coefficients are left unchanged.
    pub fn derive_coefficients(&mut self) -> Result<()> {
        let formula = self.basis.require_formula()?;
        self.derive_with(formula);
        Ok(())
    }

    /// Run an already-resolved formula over the current history
    ///
    /// `formula` must come from this interpolator's own basis.
    pub(crate) fn derive_with(&mut self, formula: Formula<T>) {
        formula(&self.history, &mut self.coefficients);
    }

    /// Evaluate the current coefficients at a fractional offset
    ///
    /// Sums `c[i] * offset^i` over every coefficient, keeping a running
    /// power of the offset. Offsets outside [0, 1) extrapolate.
    pub fn evaluate(&mut self, offset: f64) -> T {
        let mut power = offset;
        let mut output = self.coefficients[0];
        for &coeff in &self.coefficients[1..] {
            output += coeff.scale(power);
            power *= offset;
        }
        self.last_output = output;
        output
    }

    /// Raw tap-history value, index 0 being the newest sample
    ///
    /// # Errors
    /// Returns `FarrowError::IndexOutOfRange` if `index > order + 1`
    pub fn check(&self, index: usize) -> Result<T> {
        self.history
            .get(index)
            .copied()
            .ok_or(FarrowError::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }

    /// Zero the tap history and cached output
    ///
    /// Coefficients are left stale until the next derivation.
    pub fn reset(&mut self) {
        self.history.fill(T::zero());
        self.last_output = T::zero();
    }

    /// Most recently computed output
    pub fn out(&self) -> T {
        self.last_output
    }

    pub fn history(&self) -> &[T] {
        &self.history
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    #[test]
    fn test_invalid_order_rejected() {
        assert_eq!(
            FarrowInterpolator::<f64>::new(0).err(),
            Some(FarrowError::InvalidOrder(0))
        );
        assert_eq!(
            FarrowInterpolator::<f64>::new(5).err(),
            Some(FarrowError::InvalidOrder(5))
        );
    }

    #[test]
    fn test_buffer_lengths_follow_order() {
        for order in 1..=4 {
            let f = FarrowInterpolator::<f32>::new(order).unwrap();
            assert_eq!(f.order(), order);
            assert_eq!(f.history().len(), order + 2);
            assert_eq!(f.coefficients().len(), order + 1);
        }
        let f = FarrowInterpolator::<f32>::with_basis(Basis::Square);
        assert_eq!(f.history().len(), 4);
        assert_eq!(f.coefficients().len(), 3);
    }

    #[test]
    fn test_input_shifts_history() {
        let mut f = FarrowInterpolator::<f64>::new(2).unwrap();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            f.input(x);
        }
        assert_eq!(f.history(), &[5.0, 4.0, 3.0, 2.0]);
        // Coefficients untouched by input
        assert!(f.coefficients().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_linear_passthrough() {
        let mut f = FarrowInterpolator::<f64>::new(1).unwrap();
        f.input(9.0);
        for (i, offset) in [0.0, 0.25, 0.5, 0.99].into_iter().enumerate() {
            let x = i as f64 - 1.5;
            assert_eq!(f.update(x, offset).unwrap(), x);
            assert_eq!(f.out(), x);
        }
        assert!(f.coefficients().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_linear_explicit_derivation_interpolates() {
        let mut f = FarrowInterpolator::<f64>::new(1).unwrap();
        f.input(2.0);
        f.input(4.0);
        f.derive_coefficients().unwrap();
        assert_abs_diff_eq!(f.evaluate(0.25), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_parabolic_golden_value() {
        let mut f = FarrowInterpolator::<f64>::new(2).unwrap();
        for x in [0.0, 0.0, 1.0, 0.0] {
            f.input(x);
        }
        let out = f.rephase(0.5).unwrap();
        let c = f.coefficients().to_vec();
        assert_eq!(c, vec![0.0, 3.0, -1.0]);
        assert_eq!(out, c[0] + 0.5 * c[1] + 0.25 * c[2]);
        assert_eq!(out, 1.25);
        assert_eq!(f.out(), 1.25);
    }

    #[test]
    fn test_cubic_step_at_zero_offset() {
        let mut f = FarrowInterpolator::<f64>::new(3).unwrap();
        for x in [0.0, 0.0, 0.0, 1.0] {
            f.input(x);
        }
        let out = f.update(1.0, 0.0).unwrap();
        assert_eq!(out, 6.0 * f.check(2).unwrap());
        assert_eq!(out, 0.0);

        // Next sample moves the step into the interpolation interval
        let out = f.update(1.0, 0.0).unwrap();
        assert_eq!(out, 6.0 * f.check(2).unwrap());
        assert_eq!(out, 6.0);
    }

    #[test]
    fn test_cubic_highest_coefficient_is_used() {
        // Impulse at z[0]: only c[1] and c[3] are non-zero
        let mut f = FarrowInterpolator::<f64>::new(3).unwrap();
        let out = f.update(1.0, 0.5).unwrap();
        assert_abs_diff_eq!(out, -0.5 + 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_input_gives_zero_output() {
        for order in 1..=3 {
            let mut f = FarrowInterpolator::<f64>::new(order).unwrap();
            for _ in 0..8 {
                f.input(0.0);
            }
            for offset in [0.0, 0.3, 0.7] {
                assert_eq!(f.update(0.0, offset).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn test_rephase_is_idempotent() {
        let mut f = FarrowInterpolator::<f64>::new(3).unwrap();
        for x in [0.3, -1.2, 0.8, 2.5, -0.4] {
            f.input(x);
        }
        let first = f.rephase(0.37).unwrap();
        let second = f.rephase(0.37).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rephase_upsamples_between_taps() {
        let mut f = FarrowInterpolator::<f64>::new(3).unwrap();
        // Ramp: z[2] = 2, z[1] = 3
        for x in [0.0, 1.0, 2.0, 3.0, 4.0] {
            f.input(x);
        }
        for (offset, expected) in [(0.0, 2.0), (0.25, 2.25), (0.5, 2.5), (0.75, 2.75)] {
            let out = f.rephase(offset).unwrap() / Basis::Cubic.gain();
            assert_abs_diff_eq!(out, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_check_bounds() {
        let mut f = FarrowInterpolator::<f64>::new(2).unwrap();
        f.input(7.0);
        assert_eq!(f.check(0).unwrap(), 7.0);
        assert_eq!(f.check(3).unwrap(), 0.0);
        assert_eq!(
            f.check(4),
            Err(FarrowError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_reset_zeroes_history_and_output() {
        let mut f = FarrowInterpolator::<f64>::new(3).unwrap();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            f.update(x, 0.5).unwrap();
        }
        assert!(f.out() != 0.0);
        f.reset();
        for i in 0..=4 {
            assert_eq!(f.check(i).unwrap(), 0.0);
        }
        assert_eq!(f.out(), 0.0);
    }

    #[test]
    fn test_quartic_reports_missing_formula() {
        let mut f = FarrowInterpolator::<f64>::new(4).unwrap();
        assert_eq!(
            f.update(1.0, 0.5),
            Err(FarrowError::UnimplementedOrderFormula(4))
        );
        assert_eq!(
            f.rephase(0.5),
            Err(FarrowError::UnimplementedOrderFormula(4))
        );
        // Failed update leaves every buffer untouched
        assert!(f.history().iter().all(|&z| z == 0.0));
        assert!(f.coefficients().iter().all(|&c| c == 0.0));
        assert_eq!(f.out(), 0.0);
    }

    #[test]
    fn test_resolved_formula_fills_own_coefficients() {
        let z = [0.7, -1.3, 2.9, 0.4, -2.2];
        for basis in [Basis::Linear, Basis::Square, Basis::Parabolic, Basis::Cubic] {
            let mut explicit = FarrowInterpolator::<f64>::with_basis(basis);
            let mut resolved = FarrowInterpolator::<f64>::with_basis(basis);
            for &x in z.iter().rev() {
                explicit.input(x);
                resolved.input(x);
            }
            explicit.derive_coefficients().unwrap();
            resolved.derive_with(basis.require_formula().unwrap());
            assert_eq!(resolved.coefficients().len(), basis.num_terms());
            assert_eq!(resolved.coefficients(), explicit.coefficients());
        }
    }

    #[test]
    fn test_complex_samples() {
        let mut f = FarrowInterpolator::<Complex64>::new(3).unwrap();
        for k in 0..5 {
            f.input(Complex64::new(k as f64, -(k as f64)));
        }
        let out = f.rephase(0.5).unwrap().scale(1.0 / 6.0);
        assert_abs_diff_eq!(out.re, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out.im, -2.5, epsilon = 1e-12);
    }
}
