use anc_rs::profiling::profile_log_path;
use serde::Serialize;

use crate::cli::InfoArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct InfoOutput {
    cli_version: String,
    platform: String,
    arch: String,
    profile_log: String,
}

pub fn execute(args: InfoArgs) -> i32 {
    let info = InfoOutput {
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        profile_log: profile_log_path().display().to_string(),
    };

    if args.json {
        match output::to_json(&info, false) {
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
        println!("anc CLI v{}", info.cli_version);
        println!("Platform: {} ({})", info.platform, info.arch);
        println!("Profile log: {}", info.profile_log);
    }

    exit_codes::SUCCESS
}
