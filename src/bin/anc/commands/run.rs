use std::path::Path;

use anc_rs::{parser, CancellationRunner};

use crate::cli::RunArgs;
use crate::exit_codes;
use crate::output;
use crate::params;

pub fn execute(args: RunArgs) -> i32 {
    if let Err(msg) = params::validate_file(&args.file) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
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

    let recording = match parser::load_recording(Path::new(&args.file)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.file, e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let (channels, references) =
        match params::split_recording(&recording, &args.references, args.signals.as_deref()) {
            Ok(split) => split,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return exit_codes::INPUT_ERROR;
            }
        };

    if !args.quiet {
        eprintln!("Running {} cancellation on {}...", args.filter.algorithm, args.file);
        eprintln!(
            "  Channels: {} signal, {} reference, {} samples",
            channels.len(),
            references.len(),
            references.first().map(|r| r.len()).unwrap_or(0)
        );
        eprintln!("  Filter order: {}", args.filter.filter_order);
    }

    let runner = CancellationRunner::new(config);
    let result = match runner.run(&channels, &references) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Cancellation failed: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    if !args.quiet {
        for c in &result.reduction.channels {
            eprintln!(
                "  channel {}: {:.1}% reduction{}",
                c.channel,
                c.reduction_pct,
                if c.silent_input { " (silent input)" } else { "" }
            );
        }
    }

    if let Some(ref path) = args.filtered_out {
        if let Err(e) = parser::write_recording(Path::new(path), &result.filtered) {
            eprintln!("Error writing filtered matrix to '{}': {}", path, e);
            return exit_codes::EXECUTION_ERROR;
        }
        if !args.quiet {
            eprintln!("Filtered matrix written to {}", path);
        }
    }

    match output::to_json(&result, args.compact) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
