use uuid::Uuid;

use crate::error::Result;
use crate::lms::LmsFilterBank;
use crate::reduction::evaluate_noise_reduction;
use crate::rls::RlsFilterBank;
use crate::types::{CancellationConfig, CancellationResult, FilterOutput};

/// Cancellation Runner
///
/// Orchestrates one complete interference-cancellation pass: validates the
/// configured bank against the input shapes, runs it over every channel,
/// evaluates the noise reduction against the raw input, and assembles the
/// result record.
pub struct CancellationRunner {
    config: CancellationConfig,
}

impl CancellationRunner {
    pub fn new(config: CancellationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CancellationConfig {
        &self.config
    }

    /// Run interference cancellation with the configured algorithm.
    ///
    /// # Arguments
    /// * `channels` - Signal channel matrix [channels × samples]
    /// * `references` - Reference sensor matrix [channels × samples], same
    ///   sample count as `channels`
    ///
    /// # Returns
    /// CancellationResult with the filtered matrix, final weight tensor and
    /// per-channel noise-reduction report. Fails before any sample is
    /// processed on configuration or shape errors; there is no partial
    /// output.
    pub fn run(
        &self,
        channels: &[Vec<f64>],
        references: &[Vec<f64>],
    ) -> Result<CancellationResult> {
        let analysis_id = Uuid::new_v4().to_string();

        log::info!(
            "Starting {} cancellation: {} signal channels, {} reference channels",
            self.config.algorithm().abbreviation(),
            channels.len(),
            references.len()
        );
        log::info!("Filter order: {}", self.config.filter_order());

        crate::profile_scope!("cancellation_run");

        let output: FilterOutput = match &self.config {
            CancellationConfig::Lms(c) => {
                LmsFilterBank::new(c.clone()).filter(channels, references)?
            }
            CancellationConfig::Rls(c) => {
                RlsFilterBank::new(c.clone()).filter(channels, references)?
            }
        };

        let reduction = evaluate_noise_reduction(channels, &output.filtered)?;
        if let Some(mean) = reduction.mean_reduction_pct() {
            log::info!("Mean noise reduction: {:.1}%", mean);
        }

        Ok(CancellationResult::new(
            analysis_id,
            self.config.clone(),
            output,
            reduction,
        ))
    }
}
