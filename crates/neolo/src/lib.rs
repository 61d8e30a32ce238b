//! Argument parsing for the `neolo` binary.
//!
//! [`Cli`] holds the global flags and [`Commands`] the subcommands; the
//! implementations live under [`commands`]. `main.rs` only wires them to
//! configuration and logging. [`command()`] hands the same definition to
//! `xtask` for man pages and completions.

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colorize text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    /// Force color.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Set the process-wide `owo-colors` override. Call once, before printing.
    pub fn apply(self) {
        let forced = match self {
            Self::Auto => return,
            Self::Always => true,
            Self::Never => false,
        };
        owo_colors::set_override(forced);
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, neolo_core=trace)
    NEOLO_LOG_PATH         Explicit JSONL log file path
    NEOLO_LOG_DIR          JSONL log directory
    NEOLO_<FIELD>          Override any config field (e.g., NEOLO_HDD_SAMPLE_SIZE=50)
";

/// Global options shared by every subcommand.
#[derive(Parser)]
#[command(name = "neolo")]
#[command(about = "Lexical diversity and neologism statistics for plain text", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// neolo subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Count types and tokens, and run diversity estimators
    Analyze(commands::analyze::AnalyzeArgs),

    /// Split a text into one sentence per line
    Sentences(commands::sentences::SentencesArgs),

    /// List words missing from reference dictionaries
    Neologisms(commands::neologisms::NeologismsArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Print the JSON Schema of the analysis report
    Schema(commands::schema::SchemaArgs),
}

/// The full clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
