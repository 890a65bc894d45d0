//! Lag-stacked regressor construction shared by the LMS and RLS banks
//!
//! The regressor at time index `n` concatenates, for each reference channel,
//! the `filter_order` most recent samples ending at `n` inclusive, most
//! recent first. Both filter banks train against this exact layout, so the
//! ordering convention here defines what every weight coefficient means.

use nalgebra::DVector;

/// Builds fixed-length regressor vectors from time-lagged reference samples.
///
/// Pure with respect to its inputs; `fill` writes into a caller-supplied
/// buffer so the per-sample loop allocates nothing.
pub struct RegressorBuilder<'a> {
    references: &'a [Vec<f64>],
    filter_order: usize,
}

impl<'a> RegressorBuilder<'a> {
    /// `references` is [channels × samples]; `filter_order` must not exceed
    /// the sample count (enforced by the banks before any `fill` call).
    pub fn new(references: &'a [Vec<f64>], filter_order: usize) -> Self {
        Self {
            references,
            filter_order,
        }
    }

    pub fn filter_order(&self) -> usize {
        self.filter_order
    }

    pub fn num_references(&self) -> usize {
        self.references.len()
    }

    /// Length of the regressor: `filter_order * R`
    pub fn regressor_len(&self) -> usize {
        self.filter_order * self.references.len()
    }

    /// Write the regressor for time index `n` (0-based).
    ///
    /// Reference `r` occupies the block `r * filter_order ..`, ordered
    /// `[r[n], r[n-1], ..., r[n-filter_order+1]]`. Requires
    /// `n >= filter_order - 1` and a buffer of `regressor_len()` elements.
    pub fn fill(&self, n: usize, regressor: &mut DVector<f64>) {
        debug_assert!(n + 1 >= self.filter_order);
        debug_assert_eq!(regressor.len(), self.regressor_len());

        let mut idx = 0;
        for reference in self.references {
            for lag in 0..self.filter_order {
                regressor[idx] = reference[n - lag];
                idx += 1;
            }
        }
    }
}
