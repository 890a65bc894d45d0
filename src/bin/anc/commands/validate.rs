use std::path::Path;

use anc_rs::parser;
use serde::Serialize;

use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use crate::params;

#[derive(Serialize)]
struct ValidationOutput {
    file: String,
    valid: bool,
    num_channels: usize,
    num_samples: usize,
}

pub fn execute(args: ValidateArgs) -> i32 {
    if let Err(msg) = params::validate_file(&args.file) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let recording = match parser::load_recording(Path::new(&args.file)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let report = ValidationOutput {
        file: args.file.clone(),
        valid: true,
        num_channels: recording.len(),
        num_samples: recording.first().map(|c| c.len()).unwrap_or(0),
    };

    if args.json {
        match output::to_json(&report, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        println!("{}: OK", report.file);
        println!(
            "  {} channels × {} samples",
            report.num_channels, report.num_samples
        );
    }

    exit_codes::SUCCESS
}
