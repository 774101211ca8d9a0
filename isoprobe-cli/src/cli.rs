//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use isoprobe_scenario::{ISOFOR_SMOKE, RunMode};

/// isoprobe -- isolation forest smoke-test runner.
///
/// Use `isoprobe <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "isoprobe", version, about, long_about = None)]
pub struct Cli {
    /// Path to the isoprobe.toml configuration file (missing file = defaults).
    #[arg(short, long, default_value = "isoprobe.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a builtin scenario.
    Run(RunArgs),

    /// List builtin scenarios.
    List,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Invocation mode selected at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Setup/teardown logging and run metrics around the scenario.
    Standalone,
    /// Call the scenario directly.
    Embedded,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standalone => RunMode::Standalone,
            ModeArg::Embedded => RunMode::Embedded,
        }
    }
}

/// Run a builtin scenario.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario name (see `isoprobe list`).
    #[arg(default_value = ISOFOR_SMOKE)]
    pub scenario: String,

    /// Invocation mode.
    #[arg(long, value_enum, default_value = "standalone")]
    pub mode: ModeArg,

    /// Directory containing `smalldata/` (default: search upward from cwd).
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// Override the scenario's tree count.
    #[arg(long)]
    pub ntrees: Option<usize>,

    /// Fix the training seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

// ---- config ----

/// Manage isoprobe configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, data, forest).
        #[arg(long)]
        section: Option<String>,
    },
}
