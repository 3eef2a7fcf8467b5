use crate::constants::{MAX_RATIO, MIN_RATIO};
use crate::error::{FarrowError, Result};
use crate::signal_processing::{Basis, FarrowInterpolator, Formula, Sample};

/// Arbitrary-ratio sample-rate converter built on the Farrow interpolator
///
/// Coefficients are derived once per input sample; every output that
/// falls inside the current interpolation interval is then an evaluation
/// of the same coefficient set at its own fractional offset (rephase).
///
/// Output starts once the tap history holds nothing but real input.
pub struct Resampler<T: Sample> {
    interpolator: FarrowInterpolator<T>,
    formula: Formula<T>,
    ratio: f64,
    step: f64,
    mu: f64,
    primed: usize,
    inv_gain: f64,
}

impl<T: Sample> Resampler<T> {
    /// Create a new resampler
    ///
    /// # Arguments
    /// * `basis` - Interpolation basis
    /// * `ratio` - Output rate divided by input rate (e.g. 44100/48000)
    ///
    /// # Errors
    /// Returns `FarrowError::InvalidRatio` for a non-finite or out-of-range
    /// ratio and `FarrowError::UnimplementedOrderFormula` for a basis
    /// without a coefficient formula
    pub fn new(basis: Basis, ratio: f64) -> Result<Self> {
        let formula = basis.require_formula()?;
        validate_ratio(ratio)?;
        log::debug!("Resampler: basis={:?}, ratio={:.6}", basis, ratio);
        Ok(Self {
            interpolator: FarrowInterpolator::with_basis(basis),
            formula,
            ratio,
            step: 1.0 / ratio,
            mu: 0.0,
            primed: 0,
            inv_gain: 1.0 / basis.gain(),
        })
    }

    /// Create a resampler converting between two sample rates
    pub fn from_rates(basis: Basis, input_rate: u32, output_rate: u32) -> Result<Self> {
        Self::new(basis, output_rate as f64 / input_rate as f64)
    }

    /// Resample a block of input, returning every output it completes
    ///
    /// Phase carries across calls, so a stream may be fed in any chunking.
    pub fn process(&mut self, input: &[T]) -> Vec<T> {
        let capacity = (input.len() as f64 * self.ratio).ceil() as usize + 1;
        let mut output = Vec::with_capacity(capacity);
        let taps = self.interpolator.history().len();

        for &sample in input {
            self.interpolator.input(sample);
            if self.primed < taps {
                self.primed += 1;
                if self.primed < taps {
                    continue;
                }
            }

            self.interpolator.derive_with(self.formula);
            while self.mu < 1.0 {
                output.push(self.interpolator.evaluate(self.mu).scale(self.inv_gain));
                self.mu += self.step;
            }
            self.mu -= 1.0;
        }

        log::trace!("Resampled {} -> {} samples", input.len(), output.len());
        output
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Change the conversion ratio; phase is kept
    ///
    /// # Errors
    /// Returns `FarrowError::InvalidRatio` and keeps the old ratio if the new
    /// one is rejected
    pub fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        validate_ratio(ratio)?;
        self.ratio = ratio;
        self.step = 1.0 / ratio;
        Ok(())
    }

    pub fn basis(&self) -> Basis {
        self.interpolator.basis()
    }

    /// Input samples consumed before the first output
    pub fn warmup_samples(&self) -> usize {
        self.interpolator.history().len()
    }

    /// Input-time position of the first output, in samples
    ///
    /// Output `k` corresponds to input position `start_position() + k / ratio`.
    pub fn start_position(&self) -> f64 {
        let basis = self.interpolator.basis();
        (self.warmup_samples() - 1) as f64 - (basis.latency() + 1) as f64
    }

    /// Clear history and phase
    pub fn reset(&mut self) {
        self.interpolator.reset();
        self.mu = 0.0;
        self.primed = 0;
    }
}

fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && (MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        Ok(())
    } else {
        Err(FarrowError::InvalidRatio(ratio))
    }
}
