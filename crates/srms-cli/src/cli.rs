//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use srms_core::OperationType;
use std::io::IsTerminal;
use std::path::PathBuf;

/// SRMS CLI - bulk-import checks for the Student Result Management System
///
/// Validates and previews CSV uploads against the headers each bulk
/// operation requires, and tracks the progress of running bulk operations.
#[derive(Parser, Debug)]
#[command(
    name = "srms",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SRMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a CSV file's headers against a bulk operation
    Validate(ValidateArgs),

    /// Validate a CSV file and show its first rows
    Preview(PreviewArgs),

    /// Show the progress of a bulk operation from its status document
    Progress(ProgressArgs),

    /// List bulk operations and the headers they require
    Operations,

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the CSV file
    #[arg(value_name = "CSV_FILE")]
    pub file: PathBuf,

    /// Bulk operation the file is meant for (e.g. import_students, import_marks)
    #[arg(long, value_name = "OPERATION")]
    pub operation: OperationType,

    /// Fail when required headers are missing instead of warning
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the preview command
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Path to the CSV file
    #[arg(value_name = "CSV_FILE")]
    pub file: PathBuf,

    /// Bulk operation the file is meant for (e.g. import_students, import_marks)
    #[arg(long, value_name = "OPERATION")]
    pub operation: OperationType,

    /// Number of rows to show (defaults to the configured preview limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Fail when required headers are missing instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Output file path for the full preview report
    #[arg(long = "save-to")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the progress command
#[derive(Parser, Debug)]
pub struct ProgressArgs {
    /// Path to a bulk operation status document (JSON)
    #[arg(value_name = "STATUS_FILE")]
    pub status_file: PathBuf,

    /// Keep polling the status document until the operation settles
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between polls (defaults to the configured interval)
    #[arg(long)]
    pub interval: Option<u64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default project configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// List the locations searched for configuration files
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file
    #[arg(long, default_value = ".srms.toml")]
    pub path: PathBuf,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
