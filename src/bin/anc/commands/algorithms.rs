use anc_rs::ALGORITHM_REGISTRY;
use serde::Serialize;

use crate::cli::AlgorithmsArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct AlgorithmInfo {
    abbreviation: &'static str,
    name: &'static str,
    cost: String,
    required_params: Vec<&'static str>,
    documentation: &'static str,
}

pub fn execute(args: AlgorithmsArgs) -> i32 {
    let algorithms: Vec<AlgorithmInfo> = ALGORITHM_REGISTRY
        .iter()
        .map(|a| AlgorithmInfo {
            abbreviation: a.abbreviation,
            name: a.name,
            cost: format!("{:?}", a.cost),
            required_params: a.required_params.to_vec(),
            documentation: a.documentation,
        })
        .collect();

    if args.json {
        match output::to_json(&algorithms, false) {
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
        println!("Available cancellation algorithms:\n");
        println!(
            "  {:<8} {:<26} {:<12} {:<32}",
            "Abbrev", "Name", "Cost", "Parameters"
        );
        println!("  {}", "-".repeat(78));
        for a in &algorithms {
            println!(
                "  {:<8} {:<26} {:<12} {:<32}",
                a.abbreviation,
                a.name,
                a.cost,
                a.required_params.join(" ")
            );
        }
        println!();
        println!("Example: anc run --file rec.txt --references 0 1 --algorithm rls");
    }

    exit_codes::SUCCESS
}
