use thiserror::Error;

#[derive(Error, Debug)]
pub enum AncError {
    #[error("filter order {filter_order} is invalid for a recording of {num_samples} samples")]
    InvalidFilterOrder {
        filter_order: usize,
        num_samples: usize,
    },

    #[error("step size mu must be a positive finite value, got {mu}")]
    InvalidStepSize { mu: f64 },

    #[error("forgetting factor lambda must lie in [0.99, 1.0], got {lambda}")]
    InvalidForgettingFactor { lambda: f64 },

    #[error("initialization delta must be a positive finite value, got {delta}")]
    InvalidDelta { delta: f64 },

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("reference matrix must contain at least one channel")]
    EmptyReferenceMatrix,

    #[error("failed to parse recording: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AncError>;
