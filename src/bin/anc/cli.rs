use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "anc",
    version,
    about = "Multi-reference adaptive interference cancellation for multichannel recordings",
    long_about = "Cancel correlated environmental interference in multichannel\n\
                  magnetic-sensor recordings using reference sensors and an LMS or\n\
                  RLS adaptive filter bank. Recordings are ASCII matrices: one row\n\
                  per time sample, one column per channel."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run interference cancellation on a recording
    Run(RunArgs),
    /// Run interference cancellation over many recordings
    Batch(BatchArgs),
    /// List available cancellation algorithms
    Algorithms(AlgorithmsArgs),
    /// Parse a recording and report its shape
    Validate(ValidateArgs),
    /// Show CLI version and platform information
    Info(InfoArgs),
}

#[derive(Args, Clone)]
pub struct FilterArgs {
    /// Cancellation algorithm (LMS or RLS)
    #[arg(long, default_value = "rls")]
    pub algorithm: String,

    /// Time lags per reference channel in the regressor
    #[arg(long, default_value_t = 10)]
    pub filter_order: usize,

    /// LMS step size
    #[arg(long, default_value_t = 0.01)]
    pub mu: f64,

    /// RLS forgetting factor, in [0.99, 1.0]
    #[arg(long, default_value_t = 0.995)]
    pub lambda: f64,

    /// RLS inverse-correlation initialization (P = I/delta)
    #[arg(long, default_value_t = 1.0)]
    pub delta: f64,
}

#[derive(Args)]
pub struct RunArgs {
    /// Input recording (ASCII: samples × channels)
    #[arg(long)]
    pub file: String,

    /// 0-based rows of the recording to use as reference sensors
    #[arg(long, num_args = 1..)]
    pub references: Vec<usize>,

    /// 0-based rows to filter (default: every non-reference row)
    #[arg(long, num_args = 1..)]
    pub signals: Option<Vec<usize>>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file for the JSON result (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write the filtered matrix as an ASCII recording
    #[arg(long)]
    pub filtered_out: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting input recordings
    #[arg(long)]
    pub glob: Option<String>,

    /// Explicit list of input recordings
    #[arg(long, num_args = 1..)]
    pub files: Option<Vec<String>>,

    /// 0-based rows of each recording to use as reference sensors
    #[arg(long, num_args = 1..)]
    pub references: Vec<usize>,

    /// 0-based rows to filter (default: every non-reference row)
    #[arg(long, num_args = 1..)]
    pub signals: Option<Vec<usize>>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory for per-file JSON results (default: JSONL to stdout)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Keep going after a file fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Print the resolved file list and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct AlgorithmsArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input recording path
    #[arg(long)]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
