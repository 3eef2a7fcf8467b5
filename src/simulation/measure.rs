use crate::signal_processing::{Basis, Resampler};

use super::tone_at;

/// Error of a resampled signal against its analytic reference
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpolationError {
    pub rms: f64,
    pub peak: f64,
    pub count: usize,
}

/// Resample a sine tone and compare every output against the exact tone
/// at the input-time position that output represents
pub fn measure_tone_error(
    basis: Basis,
    freq_hz: f64,
    input_rate: u32,
    output_rate: u32,
    num_samples: usize,
) -> crate::Result<InterpolationError> {
    let input = super::generate_tone(freq_hz, input_rate, num_samples, 1.0);
    let mut resampler = Resampler::<f64>::from_rates(basis, input_rate, output_rate)?;
    let output = resampler.process(&input);

    let step = 1.0 / resampler.ratio();
    let start = resampler.start_position();

    let mut sum_sq = 0.0;
    let mut peak: f64 = 0.0;
    for (k, &y) in output.iter().enumerate() {
        let expected = tone_at(freq_hz, input_rate, start + k as f64 * step);
        let e = y - expected;
        sum_sq += e * e;
        peak = peak.max(e.abs());
    }

    let count = output.len();
    let rms = if count > 0 {
        (sum_sq / count as f64).sqrt()
    } else {
        0.0
    };
    Ok(InterpolationError { rms, peak, count })
}
