//! CLI parse: clap types for Papersmith. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Papersmith CLI - assemble custom exam-practice paper configurations
#[derive(Parser)]
#[command(name = "papersmith")]
#[command(about = "Assemble custom exam-practice papers and hand them to a generation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/config.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalogue topics
    Topics {
        /// Only show topics/subtopics matching this text
        #[arg(long)]
        search: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List available templates
    Templates {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Replay a wizard script and print the assembled paper configuration
    Build {
        /// Script file (.toml or .json) with an `actions` list
        #[arg(long)]
        script: PathBuf,
        /// Write the configuration JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay a wizard script and send the result to the generation service
    Generate {
        /// Script file (.toml or .json) with an `actions` list
        #[arg(long)]
        script: PathBuf,
    },
    /// Walk through the wizard interactively
    Wizard,
    /// Validate configuration and reference data
    Validate,
}
