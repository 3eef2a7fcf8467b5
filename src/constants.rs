//! Numeric limits shared by the interpolator and the resampler
//!
//! The resampler refuses ratios that would make the phase accumulator
//! degenerate or emit unbounded output per input sample.

/// Smallest output/input rate ratio the resampler accepts.
/// Below this a single input sample would produce no output for
/// thousands of samples and the phase accumulator loses precision.
pub const MIN_RATIO: f64 = 1e-3;

/// Largest output/input rate ratio the resampler accepts.
/// Bounds the number of outputs emitted per input sample.
pub const MAX_RATIO: f64 = 1e3;
