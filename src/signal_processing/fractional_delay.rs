use crate::error::Result;
use crate::signal_processing::{Basis, FarrowInterpolator, Filter, Formula, Sample};

/// Constant fractional delay applied to a sample stream
///
/// Wraps a [`FarrowInterpolator`] evaluated at a fixed offset after every
/// input sample. The basis gain is divided out, so a constant input comes
/// out at unit gain. The total delay is `latency + 1 - offset` samples
/// (see [`Basis::latency`]).
pub struct FractionalDelay<T: Sample> {
    interpolator: FarrowInterpolator<T>,
    formula: Formula<T>,
    offset: f64,
    inv_gain: f64,
}

impl<T: Sample> FractionalDelay<T> {
    /// Create a fractional delay line
    ///
    /// # Arguments
    /// * `basis` - Interpolation basis (linear interpolates, it does not pass through)
    /// * `offset` - Evaluation point within the interpolation interval, normally in [0, 1)
    ///
    /// # Errors
    /// Returns `FarrowError::UnimplementedOrderFormula` for a basis without a
    /// coefficient formula
    pub fn new(basis: Basis, offset: f64) -> Result<Self> {
        let formula = basis.require_formula()?;
        if !(0.0..1.0).contains(&offset) {
            log::warn!("Fractional offset {} outside [0, 1): extrapolating", offset);
        }
        Ok(Self {
            interpolator: FarrowInterpolator::with_basis(basis),
            formula,
            offset,
            inv_gain: 1.0 / basis.gain(),
        })
    }

    /// Process a single sample through the delay line
    pub fn process(&mut self, sample: T) -> T {
        self.interpolator.input(sample);
        self.interpolator.derive_with(self.formula);
        self.interpolator.evaluate(self.offset).scale(self.inv_gain)
    }

    /// Process an entire buffer of samples in-place
    pub fn process_buffer(&mut self, buffer: &mut [T]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Total delay in (possibly fractional) samples
    pub fn delay_samples(&self) -> f64 {
        (self.interpolator.basis().latency() + 1) as f64 - self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.interpolator.reset();
    }
}

impl<T: Sample> Filter<T> for FractionalDelay<T> {
    fn process(&mut self, sample: T) -> T {
        FractionalDelay::process(self, sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarrowError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linear_half_sample_delay() {
        let mut delay = FractionalDelay::<f64>::new(Basis::Linear, 0.5).unwrap();
        assert_abs_diff_eq!(delay.delay_samples(), 0.5);

        let mut ramp: Vec<f64> = (0..10).map(|n| n as f64).collect();
        delay.process_buffer(&mut ramp);
        for (n, &y) in ramp.iter().enumerate().skip(1) {
            assert_abs_diff_eq!(y, n as f64 - 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cubic_delay_on_sine() {
        let offset = 0.25;
        let mut delay = FractionalDelay::<f64>::new(Basis::Cubic, offset).unwrap();
        let d = delay.delay_samples();
        assert_abs_diff_eq!(d, 1.75);

        let freq = 0.02; // cycles per sample
        let x = |n: f64| (2.0 * PI * freq * n).sin();
        for n in 0..200 {
            let y = delay.process(x(n as f64));
            if n >= 4 {
                assert_abs_diff_eq!(y, x(n as f64 - d), epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_unit_dc_gain() {
        for basis in [Basis::Linear, Basis::Square, Basis::Parabolic, Basis::Cubic] {
            let mut delay = FractionalDelay::<f32>::new(basis, 0.4).unwrap();
            let mut buffer = vec![0.8f32; 16];
            delay.process_buffer(&mut buffer);
            assert!(
                (buffer[15] - 0.8).abs() < 1e-5,
                "{:?}: DC gain off, got {}",
                basis,
                buffer[15]
            );
        }
    }

    #[test]
    fn test_filter_trait_object() {
        let mut delay = FractionalDelay::<f32>::new(Basis::Square, 0.0).unwrap();
        let filter: &mut dyn Filter<f32> = &mut delay;
        let mut buffer = [1.0f32, 2.0, 3.0, 4.0];
        filter.process_buffer(&mut buffer);
        // Offset 0 lands on z[1]: a one-sample delay
        assert_eq!(buffer, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quartic_rejected() {
        assert!(matches!(
            FractionalDelay::<f64>::new(Basis::Quartic, 0.5),
            Err(FarrowError::UnimplementedOrderFormula(4))
        ));
    }

    #[test]
    fn test_reset() {
        let mut delay = FractionalDelay::<f64>::new(Basis::Linear, 0.5).unwrap();
        delay.process(4.0);
        delay.reset();
        assert_eq!(delay.process(2.0), 1.0);
    }
}
