use std::path::Path;
use std::time::Instant;

use anc_rs::{parser, CancellationRunner};

use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::output;
use crate::params;

pub fn execute(args: BatchArgs) -> i32 {
    let files = match resolve_files(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No matching files found");
        return exit_codes::INPUT_ERROR;
    }

    // Dry-run mode: print file list and exit
    if args.dry_run {
        for f in &files {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} file(s)", files.len());
        }
        return exit_codes::SUCCESS;
    }

    if let Err(msg) = params::validate_common_params(&args.references, &args.filter) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let config = match params::build_config(&args.filter) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if let Some(ref dir) = args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: Failed to create output directory '{}': {}", dir, e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    let runner = CancellationRunner::new(config);
    let total = files.len();
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let start_time = Instant::now();

    for (i, file_path) in files.iter().enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] {}...", i + 1, total, file_path);
        }

        match process_file(&runner, file_path, &args) {
            Ok(()) => succeeded += 1,
            Err(msg) => {
                eprintln!("  Error: {}", msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    if !args.quiet {
        eprintln!(
            "Batch complete: {}/{} succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed == 0 {
        exit_codes::SUCCESS
    } else if succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

fn process_file(runner: &CancellationRunner, file_path: &str, args: &BatchArgs) -> Result<(), String> {
    params::validate_file(file_path)?;

    let recording = parser::load_recording(Path::new(file_path))
        .map_err(|e| format!("reading '{}': {}", file_path, e))?;

    let (channels, references) =
        params::split_recording(&recording, &args.references, args.signals.as_deref())?;

    let result = runner
        .run(&channels, &references)
        .map_err(|e| format!("cancellation failed: {}", e))?;

    if let Some(ref dir) = args.output_dir {
        let stem = Path::new(file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let out_path = Path::new(dir).join(format!("{}_anc.json", stem));
        let json = output::to_json(&result, args.compact)?;
        output::write_output(&json, out_path.to_str())?;
    } else {
        // JSONL to stdout
        let json = output::to_json(&result, true)?;
        output::write_output(&json, None)?;
    }

    Ok(())
}

fn resolve_files(args: &BatchArgs) -> Result<Vec<String>, String> {
    if let Some(ref pattern) = args.glob {
        resolve_glob(pattern)
    } else if let Some(ref files) = args.files {
        Ok(files.clone())
    } else {
        Err("One of --glob or --files must be specified".to_string())
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths =
        glob::glob(pattern).map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => {
                eprintln!("Warning: glob error: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}
