use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FarrowError {
    #[error("Invalid interpolator order {0}: must be 1, 2, 3 or 4")]
    InvalidOrder(usize),

    #[error("History index {index} out of range: history holds {len} taps")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No coefficient formula for order {0}")]
    UnimplementedOrderFormula(usize),

    #[error("Invalid resampling ratio {0}: must be finite and between 0.001 and 1000")]
    InvalidRatio(f64),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FarrowError>;
