mod measure;
mod noise;
mod signal;

pub use measure::{InterpolationError, measure_tone_error};
pub use noise::{AdditiveNoiseConfig, apply_additive_noise, signal_power};
pub use signal::{generate_chirp, generate_tone, tone_at};
