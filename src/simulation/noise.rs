use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{FarrowError, Result};

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
    pub seed: Option<u64>,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

/// Add white Gaussian noise at the configured SNR relative to signal power
///
/// # Errors
/// Returns `FarrowError::Config` if the SNR yields an invalid noise level
pub fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig) -> Result<()> {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return Ok(());
    }

    let snr_linear = 10.0_f64.powf(config.snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();

    let normal = Normal::new(0.0, noise_std).map_err(|e| {
        FarrowError::Config(format!("noise level for {} dB SNR: {}", config.snr_db, e))
    })?;

    let mut rng = create_rng(config.seed);
    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng);
    }
    Ok(())
}
