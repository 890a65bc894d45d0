//! Noise-reduction evaluation
//!
//! Compares per-channel mean-square power before and after filtering and
//! reports the percentage reduction. Diagnostic only: a negative reduction
//! (filtering increased power) is reported, not corrected, and callers
//! decide how to react.

use serde::{Deserialize, Serialize};

use crate::error::{AncError, Result};

/// Per-channel reduction figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReduction {
    pub channel: usize,
    pub power_before: f64,
    pub power_after: f64,
    /// 100 * (1 - power_after / power_before); 0 when the input was silent
    pub reduction_pct: f64,
    /// Set when power_before == 0, in which case reduction_pct is 0 by
    /// definition rather than a division by zero
    pub silent_input: bool,
}

/// Noise-reduction report, one entry per channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionReport {
    pub channels: Vec<ChannelReduction>,
}

impl ReductionReport {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Mean reduction over all non-silent channels, or None if every
    /// channel was silent (or the report is empty)
    pub fn mean_reduction_pct(&self) -> Option<f64> {
        let active: Vec<&ChannelReduction> =
            self.channels.iter().filter(|c| !c.silent_input).collect();
        if active.is_empty() {
            return None;
        }
        Some(active.iter().map(|c| c.reduction_pct).sum::<f64>() / active.len() as f64)
    }
}

/// Mean-square power of one channel over the full recording
fn mean_square_power(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64
}

/// Evaluate per-channel noise reduction between `before` and `after`.
///
/// Both matrices are [channels × samples] and must agree in channel count
/// and per-channel sample count; any disagreement is a fatal
/// `DimensionMismatch`.
pub fn evaluate_noise_reduction(
    before: &[Vec<f64>],
    after: &[Vec<f64>],
) -> Result<ReductionReport> {
    if before.len() != after.len() {
        return Err(AncError::DimensionMismatch {
            context: "channel count of before/after matrices".to_string(),
            expected: before.len(),
            actual: after.len(),
        });
    }

    let mut channels = Vec::with_capacity(before.len());
    for (idx, (b, a)) in before.iter().zip(after.iter()).enumerate() {
        if b.len() != a.len() {
            return Err(AncError::DimensionMismatch {
                context: format!("sample count of channel {}", idx),
                expected: b.len(),
                actual: a.len(),
            });
        }

        let power_before = mean_square_power(b);
        let power_after = mean_square_power(a);

        let silent_input = power_before == 0.0;
        let reduction_pct = if silent_input {
            log::warn!(
                "channel {} has zero input power, reporting 0% reduction",
                idx
            );
            0.0
        } else {
            100.0 * (1.0 - power_after / power_before)
        };

        if reduction_pct < 0.0 {
            log::warn!(
                "channel {}: filtering increased power ({:.3} -> {:.3})",
                idx,
                power_before,
                power_after
            );
        }

        channels.push(ChannelReduction {
            channel: idx,
            power_before,
            power_after,
            reduction_pct,
            silent_input,
        });
    }

    Ok(ReductionReport { channels })
}
