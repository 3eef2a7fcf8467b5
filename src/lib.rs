pub mod config;
pub mod constants;
pub mod error;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{RateRatio, ResampleConfig};
pub use error::{FarrowError, Result};
pub use signal_processing::{
    Basis, FarrowInterpolator, Filter, FractionalDelay, Resampler, Sample,
};
pub use wav::{read_wav, save_wav};
