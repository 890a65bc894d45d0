use serde::{Deserialize, Serialize};

use crate::error::{AncError, Result};

/// Algorithm selector for the cancellation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Lms,
    Rls,
}

impl Algorithm {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Lms => "LMS",
            Self::Rls => "RLS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lms" => Some(Self::Lms),
            "rls" => Some(Self::Rls),
            _ => None,
        }
    }
}

/// LMS filter bank configuration
///
/// `mu` is shared by all channels; stability is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmsConfig {
    pub filter_order: usize,
    pub mu: f64,
}

impl LmsConfig {
    /// Validate every recognized option against a recording of `num_samples`.
    /// Runs before any sample is processed.
    pub fn validate(&self, num_samples: usize) -> Result<()> {
        validate_filter_order(self.filter_order, num_samples)?;
        if !(self.mu > 0.0) || !self.mu.is_finite() {
            return Err(AncError::InvalidStepSize { mu: self.mu });
        }
        Ok(())
    }
}

/// RLS filter bank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RlsConfig {
    pub filter_order: usize,
    pub lambda: f64,
    pub delta: f64,
}

impl RlsConfig {
    /// Validate every recognized option against a recording of `num_samples`.
    /// Runs before any sample is processed.
    pub fn validate(&self, num_samples: usize) -> Result<()> {
        validate_filter_order(self.filter_order, num_samples)?;
        if !self.lambda.is_finite() || self.lambda < 0.99 || self.lambda > 1.0 {
            return Err(AncError::InvalidForgettingFactor {
                lambda: self.lambda,
            });
        }
        if !(self.delta > 0.0) || !self.delta.is_finite() {
            return Err(AncError::InvalidDelta { delta: self.delta });
        }
        Ok(())
    }
}

/// Complete cancellation request configuration, one record per algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum CancellationConfig {
    Lms(LmsConfig),
    Rls(RlsConfig),
}

impl CancellationConfig {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Lms(_) => Algorithm::Lms,
            Self::Rls(_) => Algorithm::Rls,
        }
    }

    pub fn filter_order(&self) -> usize {
        match self {
            Self::Lms(c) => c.filter_order,
            Self::Rls(c) => c.filter_order,
        }
    }

    pub fn validate(&self, num_samples: usize) -> Result<()> {
        match self {
            Self::Lms(c) => c.validate(num_samples),
            Self::Rls(c) => c.validate(num_samples),
        }
    }
}

fn validate_filter_order(filter_order: usize, num_samples: usize) -> Result<()> {
    if filter_order == 0 || filter_order > num_samples {
        return Err(AncError::InvalidFilterOrder {
            filter_order,
            num_samples,
        });
    }
    Ok(())
}

/// Check channel and reference matrices before processing.
///
/// Both matrices are [channels × samples]; every row must have the same
/// sample count and the reference matrix must be non-empty. Returns the
/// shared sample count.
pub fn check_input_shapes(channels: &[Vec<f64>], references: &[Vec<f64>]) -> Result<usize> {
    if references.is_empty() {
        return Err(AncError::EmptyReferenceMatrix);
    }

    let num_samples = references[0].len();
    for (idx, row) in references.iter().enumerate() {
        if row.len() != num_samples {
            return Err(AncError::DimensionMismatch {
                context: format!("reference channel {}", idx),
                expected: num_samples,
                actual: row.len(),
            });
        }
    }
    for (idx, row) in channels.iter().enumerate() {
        if row.len() != num_samples {
            return Err(AncError::DimensionMismatch {
                context: format!("signal channel {}", idx),
                expected: num_samples,
                actual: row.len(),
            });
        }
    }

    Ok(num_samples)
}

/// Final, converged weight vector for every channel, stacked.
///
/// `channels[c]` holds channel `c`'s flattened weights of length
/// `filter_order * num_references`. Within the flat vector, reference `r`
/// occupies the block `r * filter_order ..`, most recent lag first —
/// the same ordering the regressor builder uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTensor {
    pub filter_order: usize,
    pub num_references: usize,
    pub channels: Vec<Vec<f64>>,
}

impl WeightTensor {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Weight of `reference` at `lag` for `channel`, or None if out of range.
    pub fn coefficient(&self, channel: usize, reference: usize, lag: usize) -> Option<f64> {
        if reference >= self.num_references || lag >= self.filter_order {
            return None;
        }
        self.channels
            .get(channel)
            .map(|w| w[reference * self.filter_order + lag])
    }
}

/// Output of one filter-bank pass
///
/// `filtered` has the same [channels × samples] shape as the input channel
/// matrix. Sample `n` of a channel is the residual `e(n) = d(n) - ŷ(n)` for
/// `n >= filter_order - 1`; the leading `filter_order - 1` warm-up samples
/// are left at zero, not copied from the raw signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOutput {
    pub filtered: Vec<Vec<f64>>,
    pub weights: WeightTensor,
}

/// Cancellation result record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationResult {
    pub id: String,
    pub algorithm: Algorithm,
    pub config: CancellationConfig,
    /// Filtered channel matrix [channels × samples]
    pub filtered: Vec<Vec<f64>>,
    pub weights: WeightTensor,
    pub reduction: crate::reduction::ReductionReport,
    pub created_at: String,
}

impl CancellationResult {
    pub fn new(
        id: String,
        config: CancellationConfig,
        output: FilterOutput,
        reduction: crate::reduction::ReductionReport,
    ) -> Self {
        Self {
            id,
            algorithm: config.algorithm(),
            config,
            filtered: output.filtered,
            weights: output.weights,
            reduction,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
