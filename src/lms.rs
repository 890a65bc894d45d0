//! LMS (Least Mean Squares) adaptive filter bank
//!
//! Per channel, independently: predict the interference from the lag-stacked
//! reference regressor, subtract the prediction from the raw sample, and
//! nudge the weights along the instantaneous gradient:
//!
//! ```text
//! ŷ(n) = wᵀ x(n)
//! e(n) = d(n) - ŷ(n)
//! w    = w + μ·e(n)·x(n)
//! ```
//!
//! The residual e(n) is the output sample. O(F·R) arithmetic per sample per
//! channel. Stability is the caller's responsibility: a too-large μ diverges
//! and the bank propagates whatever numbers result.

use nalgebra::DVector;
use rayon::prelude::*;

use crate::error::Result;
use crate::regressor::RegressorBuilder;
use crate::types::{check_input_shapes, FilterOutput, LmsConfig, WeightTensor};

/// Single-channel LMS state: the weight vector, mutated once per sample in
/// strict time order. Owned exclusively by that channel's computation.
struct LmsChannelFilter {
    weights: DVector<f64>,
    mu: f64,
}

impl LmsChannelFilter {
    fn new(num_taps: usize, mu: f64) -> Self {
        Self {
            weights: DVector::zeros(num_taps),
            mu,
        }
    }

    /// One weight-update step; returns the residual e(n).
    fn step(&mut self, regressor: &DVector<f64>, desired: f64) -> f64 {
        let prediction = self.weights.dot(regressor);
        let residual = desired - prediction;
        self.weights.axpy(self.mu * residual, regressor, 1.0);
        residual
    }
}

/// Multi-channel LMS filter bank
pub struct LmsFilterBank {
    config: LmsConfig,
}

impl LmsFilterBank {
    pub fn new(config: LmsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LmsConfig {
        &self.config
    }

    /// Cancel interference in every channel of `channels` using `references`.
    ///
    /// Both matrices are [channels × samples] with equal sample counts.
    /// Channels are processed independently (in parallel); within a channel
    /// samples are processed in increasing time order. The first
    /// `filter_order - 1` output samples of each channel are left at zero.
    ///
    /// Fails before any processing on invalid configuration or mismatched
    /// shapes; there is no partial output.
    pub fn filter(&self, channels: &[Vec<f64>], references: &[Vec<f64>]) -> Result<FilterOutput> {
        let num_samples = check_input_shapes(channels, references)?;
        self.config.validate(num_samples)?;

        let builder = RegressorBuilder::new(references, self.config.filter_order);
        log::debug!(
            "LMS pass: {} channels, {} references, {} samples, {} taps, mu={}",
            channels.len(),
            references.len(),
            num_samples,
            builder.regressor_len(),
            self.config.mu
        );

        let per_channel: Vec<(Vec<f64>, Vec<f64>)> = channels
            .par_iter()
            .map(|samples| self.filter_channel(samples, &builder))
            .collect();

        let mut filtered = Vec::with_capacity(per_channel.len());
        let mut weights = Vec::with_capacity(per_channel.len());
        for (residual, w) in per_channel {
            filtered.push(residual);
            weights.push(w);
        }

        Ok(FilterOutput {
            filtered,
            weights: WeightTensor {
                filter_order: self.config.filter_order,
                num_references: references.len(),
                channels: weights,
            },
        })
    }

    fn filter_channel(&self, samples: &[f64], builder: &RegressorBuilder) -> (Vec<f64>, Vec<f64>) {
        let mut state = LmsChannelFilter::new(builder.regressor_len(), self.config.mu);
        let mut residual = vec![0.0; samples.len()];
        let mut regressor = DVector::zeros(builder.regressor_len());

        for n in (self.config.filter_order - 1)..samples.len() {
            builder.fill(n, &mut regressor);
            residual[n] = state.step(&regressor, samples[n]);
        }

        (residual, state.weights.as_slice().to_vec())
    }
}
