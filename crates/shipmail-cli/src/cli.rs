//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shipmail - Extract shipment details from freight enquiry emails.
#[derive(Debug, Parser)]
#[command(name = "shipmail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.shipmail/config.toml)
    #[arg(short, long, global = true, env = "SHIPMAIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the extraction pipeline over an email file
    Extract(ExtractArgs),

    /// Score an output file against ground truth
    Evaluate(EvaluateArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// JSON array of {id, subject, body}
    #[arg(short, long)]
    pub emails: Option<PathBuf>,

    /// JSON array of {code, name}
    #[arg(short, long)]
    pub ports: Option<PathBuf>,

    /// Where to write the records
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Chat completions endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key (otherwise read from the configured environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Skip the network and answer every email with this reply
    #[arg(long, value_name = "REPLY")]
    pub mock: Option<String>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Extraction output to score
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ground-truth records
    #[arg(short, long)]
    pub truth: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}
