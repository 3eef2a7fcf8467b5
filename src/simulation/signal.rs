use std::f64::consts::PI;

/// Generate a sine tone
///
/// # Arguments
/// * `freq_hz` - Tone frequency
/// * `sample_rate` - Sample rate in Hz
/// * `num_samples` - Output length
/// * `amplitude` - Peak amplitude
pub fn generate_tone(
    freq_hz: f64,
    sample_rate: u32,
    num_samples: usize,
    amplitude: f64,
) -> Vec<f64> {
    (0..num_samples)
        .map(|n| amplitude * tone_at(freq_hz, sample_rate, n as f64))
        .collect()
}

/// Unit sine tone evaluated at a fractional sample position
pub fn tone_at(freq_hz: f64, sample_rate: u32, position: f64) -> f64 {
    (2.0 * PI * freq_hz * position / sample_rate as f64).sin()
}

/// Generate a linear chirp sweeping from `start_hz` to `end_hz`
pub fn generate_chirp(
    start_hz: f64,
    end_hz: f64,
    sample_rate: u32,
    num_samples: usize,
    amplitude: f64,
) -> Vec<f64> {
    let duration = num_samples as f64 / sample_rate as f64;
    let sweep_rate = (end_hz - start_hz) / duration;
    (0..num_samples)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            let phase = 2.0 * PI * (start_hz * t + 0.5 * sweep_rate * t * t);
            amplitude * phase.sin()
        })
        .collect()
}
