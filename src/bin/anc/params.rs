use std::path::Path;

use anc_rs::{AlgorithmMetadata, Algorithm, CancellationConfig, LmsConfig, RlsConfig};

use crate::cli::FilterArgs;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "csv", "ascii", "dat"];

/// Validate a single input path: existence and supported extension.
pub fn validate_file(file_path: &str) -> Result<(), String> {
    if !Path::new(file_path).exists() {
        return Err(format!("Input file not found: {}", file_path));
    }

    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if !SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
        return Err(format!(
            "Unsupported file extension '{}'. Supported: txt, csv, ascii, dat",
            ext
        ));
    }

    Ok(())
}

/// Validate the shared (not file-specific) arguments.
pub fn validate_common_params(references: &[usize], filter: &FilterArgs) -> Result<(), String> {
    if references.is_empty() {
        return Err("At least one reference channel must be specified".to_string());
    }

    if AlgorithmMetadata::from_abbrev(&filter.algorithm).is_none() {
        return Err(format!(
            "Unknown algorithm '{}'. Valid algorithms: LMS, RLS",
            filter.algorithm
        ));
    }

    if filter.filter_order == 0 {
        return Err("Filter order (--filter-order) must be greater than 0".to_string());
    }

    Ok(())
}

/// Build the per-algorithm configuration record from CLI arguments.
///
/// Numeric ranges (mu, lambda, delta, order vs. recording length) are
/// validated by the engine itself so the offending value is reported there.
pub fn build_config(filter: &FilterArgs) -> Result<CancellationConfig, String> {
    let meta = AlgorithmMetadata::from_abbrev(&filter.algorithm).ok_or_else(|| {
        format!(
            "Unknown algorithm '{}'. Valid algorithms: LMS, RLS",
            filter.algorithm
        )
    })?;

    Ok(match meta.algorithm {
        Algorithm::Lms => CancellationConfig::Lms(LmsConfig {
            filter_order: filter.filter_order,
            mu: filter.mu,
        }),
        Algorithm::Rls => CancellationConfig::Rls(RlsConfig {
            filter_order: filter.filter_order,
            lambda: filter.lambda,
            delta: filter.delta,
        }),
    })
}

/// Split a parsed recording into signal and reference matrices.
///
/// `references` selects the reference rows; `signals` defaults to every
/// remaining row. Indices must be in range and a row cannot be both.
pub fn split_recording(
    recording: &[Vec<f64>],
    references: &[usize],
    signals: Option<&[usize]>,
) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), String> {
    let num_rows = recording.len();

    for &idx in references {
        if idx >= num_rows {
            return Err(format!(
                "Reference channel {} is out of range (recording has {} channels)",
                idx, num_rows
            ));
        }
    }

    let signal_indices: Vec<usize> = match signals {
        Some(explicit) => {
            for &idx in explicit {
                if idx >= num_rows {
                    return Err(format!(
                        "Signal channel {} is out of range (recording has {} channels)",
                        idx, num_rows
                    ));
                }
                if references.contains(&idx) {
                    return Err(format!(
                        "Channel {} is listed as both signal and reference",
                        idx
                    ));
                }
            }
            explicit.to_vec()
        }
        None => (0..num_rows).filter(|i| !references.contains(i)).collect(),
    };

    if signal_indices.is_empty() {
        return Err("No signal channels left after removing references".to_string());
    }

    let channels = signal_indices
        .iter()
        .map(|&i| recording[i].clone())
        .collect();
    let reference_matrix = references.iter().map(|&i| recording[i].clone()).collect();

    Ok((channels, reference_matrix))
}
