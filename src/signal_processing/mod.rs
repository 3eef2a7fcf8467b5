pub mod basis;
pub mod farrow;
pub mod filter;
pub mod fractional_delay;
pub mod resampler;
pub mod sample;

pub use basis::{Basis, Formula};
pub use farrow::FarrowInterpolator;
pub use filter::Filter;
pub use fractional_delay::FractionalDelay;
pub use resampler::Resampler;
pub use sample::Sample;
