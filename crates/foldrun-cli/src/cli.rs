use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "foldrun contributors",
    version,
    about = "foldrun CLI - Prepare protein sequences, drive a ColabFold-compatible structure prediction engine and organize its output.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all console log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize the input, run the structure prediction engine and organize its artifacts.
    Predict(PredictArgs),
    /// Normalize the input and write the canonical request file without running the engine.
    Normalize(NormalizeArgs),
    /// Manage the local engine data directory.
    Data(DataArgs),
}

/// Exactly one source of sequences.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputSource {
    /// Path to a FASTA-like file with alternating `>header` and sequence lines.
    #[arg(long, value_name = "PATH")]
    pub fasta: Option<PathBuf>,

    /// Free text: `>header` tagged records, or one protein per line with `:` between chains.
    #[arg(long, value_name = "TEXT")]
    pub sequence: Option<String>,

    /// Path to a TOML file of `[[protein]]` tables with `[[protein.chain]]` entries.
    #[arg(long, value_name = "PATH")]
    pub proteins: Option<PathBuf>,
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    // --- Core Arguments ---
    #[command(flatten)]
    pub input: InputSource,

    /// Name of this run; becomes the leaf directory of the artifact layout.
    #[arg(short = 'n', long, required = true, value_name = "NAME")]
    pub run_name: String,

    /// Directory under which the `<run-name>/results` and `<run-name>/other` layout is created.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Destination root reported as the final artifact location instead of the default namespace.
    #[arg(long, value_name = "URI")]
    pub destination: Option<String>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Run Overrides ---
    /// Number of models to predict (clamped to 1-5).
    #[arg(short = 'm', long, value_name = "INT", allow_negative_numbers = true)]
    pub num_models: Option<i64>,

    /// Number of recycles per model (clamped to 1-50).
    #[arg(short = 'r', long, value_name = "INT", allow_negative_numbers = true)]
    pub num_recycles: Option<i64>,

    /// Directory of custom templates passed to the engine.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    // --- Engine Overrides ---
    /// Override the engine executable.
    #[arg(long, value_name = "PATH")]
    pub engine: Option<PathBuf>,

    /// Skip the AMBER relaxation step (also disables GPU relaxation).
    #[arg(long)]
    pub no_amber: bool,

    /// Abort the engine after this many seconds (0 disables the limit).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S run.num-models=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputSource,

    /// Path for the canonical request file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the engine data directory.
    Path,
    /// Set a custom path for the engine data directory.
    SetPath {
        /// The new path to use for engine data (weights and caches).
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific cache location.
    ResetPath,
}
