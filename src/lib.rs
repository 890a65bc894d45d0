pub mod algorithms;
pub mod error;
pub mod lms;
pub mod parser;
pub mod profiling;
pub mod reduction;
pub mod regressor;
pub mod rls;
pub mod runner;
pub mod types;

pub use algorithms::{AlgorithmMetadata, ALGORITHM_REGISTRY};
pub use error::{AncError, Result};
pub use lms::LmsFilterBank;
pub use reduction::{evaluate_noise_reduction, ChannelReduction, ReductionReport};
pub use regressor::RegressorBuilder;
pub use rls::RlsFilterBank;
pub use runner::CancellationRunner;
pub use types::*;
