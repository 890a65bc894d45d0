//! Adaptive-algorithm definitions for the cancellation engine

use serde::Serialize;

use crate::types::Algorithm;

/// Per-sample arithmetic cost class of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostClass {
    /// O(F·R) per sample per channel
    Linear,
    /// O((F·R)²) per sample per channel
    Quadratic,
}

/// Complete algorithm metadata
/// Note: Only Serialize is derived since static references can't be deserialized
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmMetadata {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub algorithm: Algorithm,
    pub cost: CostClass,
    #[serde(skip)]
    pub required_params: &'static [&'static str],
    pub documentation: &'static str,
}

impl AlgorithmMetadata {
    /// Look up an algorithm by abbreviation (case-insensitive)
    pub fn from_abbrev(abbrev: &str) -> Option<&'static AlgorithmMetadata> {
        ALGORITHM_REGISTRY
            .iter()
            .find(|a| a.abbreviation.eq_ignore_ascii_case(abbrev))
    }

    pub fn for_algorithm(algorithm: Algorithm) -> &'static AlgorithmMetadata {
        match algorithm {
            Algorithm::Lms => &LMS,
            Algorithm::Rls => &RLS,
        }
    }
}

/// Least Mean Squares (LMS)
///
/// Stochastic-gradient weight update. Cheapest per sample; convergence speed
/// and stability are governed by the step size mu.
pub const LMS: AlgorithmMetadata = AlgorithmMetadata {
    abbreviation: "LMS",
    name: "Least Mean Squares",
    algorithm: Algorithm::Lms,
    cost: CostClass::Linear,
    required_params: &["--mu", "--filter-order"],
    documentation: "Stochastic-gradient adaptive filter. O(F*R) per sample. Convergence speed and stability depend on the step size mu; a too-large mu diverges without warning.",
};

/// Recursive Least Squares (RLS)
///
/// Maintains an inverse-correlation estimate per channel. Converges in far
/// fewer samples than LMS at quadratic per-sample cost.
pub const RLS: AlgorithmMetadata = AlgorithmMetadata {
    abbreviation: "RLS",
    name: "Recursive Least Squares",
    algorithm: Algorithm::Rls,
    cost: CostClass::Quadratic,
    required_params: &["--lambda", "--delta", "--filter-order"],
    documentation: "Recursive least-squares adaptive filter with per-channel inverse-correlation matrix. O((F*R)^2) per sample. Use when convergence speed matters more than per-sample cost.",
};

/// All algorithms, in selection order
pub const ALGORITHM_REGISTRY: &[AlgorithmMetadata] = &[LMS, RLS];
