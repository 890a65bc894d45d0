use assert_cmd::Command;
use predicates::prelude::*;

fn anc() -> Command {
    Command::cargo_bin("anc").unwrap()
}

/// Write a small synthetic recording: column 0 is the reference noise,
/// columns 1..=2 are signals contaminated by it.
fn write_recording(path: &std::path::Path, len: usize) {
    let mut content = String::from("# synthetic test recording\n");
    let mut state: u64 = 99;
    for i in 0..len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let r = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
        let s1 = 0.2 * (2.0 * std::f64::consts::PI * 0.013 * i as f64).sin();
        let s2 = 0.1 * (2.0 * std::f64::consts::PI * 0.021 * i as f64).cos();
        content.push_str(&format!("{} {} {}\n", r, s1 + 0.8 * r, s2 - 0.9 * r));
    }
    std::fs::write(path, content).unwrap();
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    anc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    anc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("anc"));
}

#[test]
fn test_help_flag() {
    anc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("interference cancellation"));
}

// =============================================================================
// ALGORITHMS SUBCOMMAND
// =============================================================================

#[test]
fn test_algorithms_subcommand() {
    anc()
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("LMS"))
        .stdout(predicate::str::contains("RLS"));
}

#[test]
fn test_algorithms_json() {
    let output = anc().arg("algorithms").arg("--json").assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    let abbrevs: Vec<&str> = arr
        .iter()
        .map(|v| v.get("abbreviation").unwrap().as_str().unwrap())
        .collect();
    assert!(abbrevs.contains(&"LMS"));
    assert!(abbrevs.contains(&"RLS"));
}

// =============================================================================
// INFO SUBCOMMAND
// =============================================================================

#[test]
fn test_info_subcommand() {
    anc()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("anc CLI v"))
        .stdout(predicate::str::contains("Platform:"));
}

#[test]
fn test_info_json() {
    let output = anc().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("cli_version").is_some());
    assert!(parsed.get("platform").is_some());
    assert!(parsed.get("arch").is_some());
}

// =============================================================================
// VALIDATE SUBCOMMAND
// =============================================================================

#[test]
fn test_validate_nonexistent_file() {
    anc()
        .arg("validate")
        .arg("--file")
        .arg("/nonexistent/recording.txt")
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_validate_reports_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("rec.txt");
    write_recording(&path, 50);

    let output = anc()
        .arg("validate")
        .arg("--file")
        .arg(path.to_str().unwrap())
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.get("num_channels").unwrap().as_u64().unwrap(), 3);
    assert_eq!(parsed.get("num_samples").unwrap().as_u64().unwrap(), 50);
}

#[test]
fn test_validate_unsupported_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("rec.xyz");
    std::fs::write(&path, "1.0 2.0\n").unwrap();

    anc()
        .arg("validate")
        .arg("--file")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stderr(predicate::str::contains("Unsupported file extension"));
}

// =============================================================================
// RUN SUBCOMMAND
// =============================================================================

#[test]
fn test_run_rls_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let rec_path = tmp.path().join("rec.txt");
    let out_path = tmp.path().join("result.json");
    write_recording(&rec_path, 400);

    anc()
        .arg("run")
        .arg("--file")
        .arg(rec_path.to_str().unwrap())
        .arg("--references")
        .arg("0")
        .arg("--algorithm")
        .arg("rls")
        .arg("--filter-order")
        .arg("5")
        .arg("--quiet")
        .arg("--output")
        .arg(out_path.to_str().unwrap())
        .assert()
        .success();

    let json = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.get("algorithm").unwrap().as_str().unwrap(), "rls");
    assert!(!parsed.get("id").unwrap().as_str().unwrap().is_empty());
    assert_eq!(parsed.get("filtered").unwrap().as_array().unwrap().len(), 2);

    let reduction = parsed
        .get("reduction")
        .unwrap()
        .get("channels")
        .unwrap()
        .as_array()
        .unwrap();
    assert_eq!(reduction.len(), 2);
    // the reference explains most of each channel's power
    for c in reduction {
        assert!(c.get("reduction_pct").unwrap().as_f64().unwrap() > 50.0);
    }
}

#[test]
fn test_run_writes_filtered_matrix() {
    let tmp = tempfile::tempdir().unwrap();
    let rec_path = tmp.path().join("rec.txt");
    let filtered_path = tmp.path().join("filtered.txt");
    write_recording(&rec_path, 200);

    anc()
        .arg("run")
        .arg("--file")
        .arg(rec_path.to_str().unwrap())
        .arg("--references")
        .arg("0")
        .arg("--filter-order")
        .arg("4")
        .arg("--quiet")
        .arg("--output")
        .arg(tmp.path().join("r.json").to_str().unwrap())
        .arg("--filtered-out")
        .arg(filtered_path.to_str().unwrap())
        .assert()
        .success();

    let content = std::fs::read_to_string(&filtered_path).unwrap();
    let first_line = content.lines().next().unwrap();
    assert_eq!(first_line.split_whitespace().count(), 2);
    assert_eq!(content.lines().count(), 200);
}

#[test]
fn test_run_unknown_algorithm() {
    let tmp = tempfile::tempdir().unwrap();
    let rec_path = tmp.path().join("rec.txt");
    write_recording(&rec_path, 50);

    anc()
        .arg("run")
        .arg("--file")
        .arg(rec_path.to_str().unwrap())
        .arg("--references")
        .arg("0")
        .arg("--algorithm")
        .arg("kalman")
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stderr(predicate::str::contains("Unknown algorithm"));
}

#[test]
fn test_run_invalid_lambda_fails_execution() {
    let tmp = tempfile::tempdir().unwrap();
    let rec_path = tmp.path().join("rec.txt");
    write_recording(&rec_path, 50);

    anc()
        .arg("run")
        .arg("--file")
        .arg(rec_path.to_str().unwrap())
        .arg("--references")
        .arg("0")
        .arg("--algorithm")
        .arg("rls")
        .arg("--lambda")
        .arg("1.01")
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("forgetting factor"));
}

#[test]
fn test_run_filter_order_exceeding_recording() {
    let tmp = tempfile::tempdir().unwrap();
    let rec_path = tmp.path().join("rec.txt");
    write_recording(&rec_path, 20);

    anc()
        .arg("run")
        .arg("--file")
        .arg(rec_path.to_str().unwrap())
        .arg("--references")
        .arg("0")
        .arg("--filter-order")
        .arg("21")
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("filter order 21"));
}

// =============================================================================
// BATCH SUBCOMMAND
// =============================================================================

#[test]
fn test_batch_dry_run() {
    let tmp = tempfile::tempdir().unwrap();
    write_recording(&tmp.path().join("a.txt"), 50);
    write_recording(&tmp.path().join("b.txt"), 50);

    let pattern = format!("{}/*.txt", tmp.path().to_str().unwrap());
    anc()
        .arg("batch")
        .arg("--glob")
        .arg(&pattern)
        .arg("--references")
        .arg("0")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn test_batch_writes_per_file_results() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("results");
    write_recording(&tmp.path().join("a.txt"), 100);
    write_recording(&tmp.path().join("b.txt"), 100);

    let pattern = format!("{}/*.txt", tmp.path().to_str().unwrap());
    anc()
        .arg("batch")
        .arg("--glob")
        .arg(&pattern)
        .arg("--references")
        .arg("0")
        .arg("--filter-order")
        .arg("4")
        .arg("--output-dir")
        .arg(out_dir.to_str().unwrap())
        .arg("--quiet")
        .assert()
        .success();

    assert!(out_dir.join("a_anc.json").exists());
    assert!(out_dir.join("b_anc.json").exists());
}

#[test]
fn test_batch_without_inputs() {
    anc()
        .arg("batch")
        .arg("--references")
        .arg("0")
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stderr(predicate::str::contains("must be specified"));
}
