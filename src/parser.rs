//! ASCII recording ingestion for the CLI front-end
//!
//! Recordings are whitespace-separated numeric text: one row per time
//! sample, one column per sensor channel. `#` comments and blank lines are
//! skipped. The engine itself never parses files; these helpers exist for
//! the `anc` binary and for tests.

use std::path::Path;

use memmap2::Mmap;

use crate::error::{AncError, Result};

/// Parse an ASCII recording into a [channels × samples] matrix.
///
/// Rows with a column count different from the first data row are skipped
/// with a warning; non-finite values are dropped within a row. An input
/// with no valid data rows is a `ParseError`.
pub fn parse_recording(content: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut expected_cols = 0usize;

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let values: Vec<f64> = trimmed
            .split_whitespace()
            .filter_map(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .collect();

        if values.is_empty() {
            continue;
        }

        if rows.is_empty() {
            expected_cols = values.len();
        } else if values.len() != expected_cols {
            log::warn!(
                "line {} has {} columns, expected {}, skipping",
                line_no + 1,
                values.len(),
                expected_cols
            );
            continue;
        }

        rows.push(values);
    }

    if rows.is_empty() {
        return Err(AncError::ParseError(
            "no valid data rows in recording".to_string(),
        ));
    }

    log::debug!(
        "Parsed recording: {} samples × {} channels",
        rows.len(),
        expected_cols
    );

    Ok(transpose(rows, expected_cols))
}

/// Parse an ASCII recording from a byte slice (e.g. mmap).
///
/// Same semantics as `parse_recording`, reading the buffer line by line
/// without building an intermediate String.
pub fn parse_recording_from_bytes(content: &[u8]) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut expected_cols = 0usize;
    let mut line_no = 0usize;

    for raw_line in content.split(|&b| b == b'\n') {
        line_no += 1;

        let line = match std::str::from_utf8(raw_line) {
            Ok(l) => l.trim(),
            Err(_) => {
                log::warn!("line {} is not valid UTF-8, skipping", line_no);
                continue;
            }
        };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values: Vec<f64> = line
            .split_whitespace()
            .filter_map(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .collect();

        if values.is_empty() {
            continue;
        }

        if rows.is_empty() {
            expected_cols = values.len();
        } else if values.len() != expected_cols {
            log::warn!(
                "line {} has {} columns, expected {}, skipping",
                line_no,
                values.len(),
                expected_cols
            );
            continue;
        }

        rows.push(values);
    }

    if rows.is_empty() {
        return Err(AncError::ParseError(
            "no valid data rows in recording".to_string(),
        ));
    }

    Ok(transpose(rows, expected_cols))
}

/// Memory-map a recording file and parse it.
pub fn load_recording(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = std::fs::File::open(path).map_err(AncError::IoError)?;
    let mmap: Mmap = unsafe { Mmap::map(&file).map_err(AncError::IoError)? };
    parse_recording_from_bytes(&mmap)
}

/// Write a [channels × samples] matrix in the same ASCII layout the parser
/// reads: one row per sample, one column per channel.
pub fn write_recording(path: &Path, matrix: &[Vec<f64>]) -> Result<()> {
    use std::io::Write;

    let num_samples = matrix.first().map(|c| c.len()).unwrap_or(0);
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);

    for n in 0..num_samples {
        for (c, channel) in matrix.iter().enumerate() {
            if c > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{}", channel[n])?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// [samples × channels] rows to [channels × samples]
fn transpose(rows: Vec<Vec<f64>>, num_cols: usize) -> Vec<Vec<f64>> {
    let mut channels: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); num_cols];
    for row in &rows {
        for (col, &value) in row.iter().enumerate() {
            channels[col].push(value);
        }
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "# two channels\n\
                       1.0 10.0\n\
                       2.0 20.0\n\
                       3.0 30.0\n";
        let matrix = parse_recording(content).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(matrix[1], vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_parse_skips_inconsistent_rows() {
        let content = "1.0 10.0\n2.0\n3.0 30.0\n";
        let matrix = parse_recording(content).unwrap();
        assert_eq!(matrix[0], vec![1.0, 3.0]);
    }

    #[test]
    fn test_parse_only_comments_fails() {
        let content = "# nothing\n# here\n";
        assert!(matches!(
            parse_recording(content),
            Err(AncError::ParseError(_))
        ));
    }

    #[test]
    fn test_bytes_parser_matches_str_parser() {
        let content = "0.5 -0.5\n1.5 -1.5\n# tail comment\n";
        let from_str = parse_recording(content).unwrap();
        let from_bytes = parse_recording_from_bytes(content.as_bytes()).unwrap();
        assert_eq!(from_str, from_bytes);
    }

    #[test]
    fn test_write_then_parse_roundtrip() {
        let dir = std::env::temp_dir().join("anc_parser_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.txt");

        let matrix = vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]];
        write_recording(&path, &matrix).unwrap();
        let parsed = load_recording(&path).unwrap();
        assert_eq!(parsed, matrix);

        std::fs::remove_file(&path).ok();
    }
}
