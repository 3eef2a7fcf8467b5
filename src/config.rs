//! Configuration for resampling runs.
//!
//! A run can be configured from a TOML file; command-line flags override
//! whatever the file sets:
//!
//! ```toml
//! basis = "cubic"
//! target_rate = 44100
//! block_size = 4096
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FarrowError, Result};
use crate::signal_processing::Basis;

/// Output/input sample-rate ratio
///
/// # Parsing formats
/// - `1.5` - plain ratio
/// - `44100/48000` - output rate over input rate
///
/// # Example
/// ```
/// use fracdelay::config::RateRatio;
///
/// let ratio: RateRatio = "44100/48000".parse().unwrap();
/// assert!((ratio.as_f64() - 0.91875).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateRatio(f64);

impl RateRatio {
    pub fn new(ratio: f64) -> Self {
        Self(ratio)
    }

    /// Ratio converting `input_rate` to `output_rate`
    pub fn from_rates(input_rate: u32, output_rate: u32) -> Self {
        Self(output_rate as f64 / input_rate as f64)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Default for RateRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for RateRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl FromStr for RateRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let ratio = if let Some((num, den)) = s.split_once('/') {
            let num: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid numerator: {}", s))?;
            let den: f64 = den
                .trim()
                .parse()
                .map_err(|_| format!("invalid denominator: {}", s))?;
            if den == 0.0 {
                return Err("denominator must be non-zero".to_string());
            }
            num / den
        } else {
            s.parse().map_err(|_| format!("invalid ratio: {}", s))?
        };

        if !ratio.is_finite() || ratio <= 0.0 {
            return Err("ratio must be positive".to_string());
        }
        Ok(Self(ratio))
    }
}

/// Resampling run configuration
///
/// Either `ratio` or `target_rate` may be set, not both. With neither the
/// signal is passed through the interpolator at its own rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResampleConfig {
    /// Interpolation basis
    pub basis: Basis,
    /// Output/input rate ratio
    pub ratio: Option<RateRatio>,
    /// Output sample rate in Hz
    pub target_rate: Option<u32>,
    /// Samples per channel handed to the resampler at a time
    pub block_size: usize,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            basis: Basis::Cubic,
            ratio: None,
            target_rate: None,
            block_size: 4096,
        }
    }
}

impl ResampleConfig {
    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// Returns `FarrowError::Config` on malformed TOML or unknown keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| FarrowError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field consistency
    ///
    /// # Errors
    /// Returns `FarrowError::Config` when both `ratio` and `target_rate` are
    /// set, a rate is not positive, the block size is zero, or the basis has
    /// no coefficient formula
    pub fn validate(&self) -> Result<()> {
        if self.ratio.is_some() && self.target_rate.is_some() {
            return Err(FarrowError::Config(
                "set either ratio or target_rate, not both".to_string(),
            ));
        }
        if let Some(ratio) = self.ratio
            && !(ratio.as_f64().is_finite() && ratio.as_f64() > 0.0)
        {
            return Err(FarrowError::Config(format!(
                "ratio {} must be positive",
                ratio
            )));
        }
        if self.target_rate == Some(0) {
            return Err(FarrowError::Config(
                "target_rate must be positive".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(FarrowError::Config(
                "block_size must be positive".to_string(),
            ));
        }
        if self.basis.formula::<f32>().is_none() {
            return Err(FarrowError::Config(format!(
                "basis {:?} has no coefficient formula",
                self.basis
            )));
        }
        Ok(())
    }

    /// Conversion ratio for a signal sampled at `input_rate`
    pub fn resolve_ratio(&self, input_rate: u32) -> RateRatio {
        match (self.ratio, self.target_rate) {
            (Some(ratio), _) => ratio,
            (None, Some(rate)) => RateRatio::from_rates(input_rate, rate),
            (None, None) => RateRatio::default(),
        }
    }

    /// Sample rate written to the output file
    pub fn output_rate(&self, input_rate: u32) -> u32 {
        match self.target_rate {
            Some(rate) => rate,
            None => {
                (input_rate as f64 * self.resolve_ratio(input_rate).as_f64()).round() as u32
            }
        }
    }
}
