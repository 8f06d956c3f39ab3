// datasan/src/cli.rs
//! Command-line interface for the datasan application: the global flags and
//! every subcommand with its arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "datasan",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove personal data from text before it leaves your machine",
    long_about = "datasan redacts emails, phone numbers and US Social Security numbers from text and JSON documents, truncates the result to a bounded length, and re-checks it so that nothing containing residual PII is ever written out.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Force debug logging regardless of RUST_LOG.
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin. Output is written only if it validates as clean.
    Sanitize(SanitizeCommand),

    /// Checks text for residual PII without changing it.
    Validate(ValidateCommand),

    /// Compares an original and a sanitized file and reports what was removed.
    Report(ReportCommand),

    /// Sanitizes JSON documents into allow-listed views.
    Document(DocumentCommand),

    /// Aggregates an audit log written by `sanitize` or `document`.
    AuditSummary(AuditSummaryCommand),
}

/// Rule selection shared by every command that sanitizes or detects.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Path to a custom redaction configuration file (YAML), merged over the built-in rules.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom redaction configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these rule names, including opt-in ones (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments for the `sanitize` command.
#[derive(Args, Debug)]
pub struct SanitizeCommand {
    #[arg(long = "input-file", short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Overrides the configured maximum output length, in characters.
    #[arg(long = "max-length", value_name = "N", env = "DATASAN_MAX_LENGTH", help = "Maximum sanitized length in characters before truncation.")]
    pub max_length: Option<usize>,

    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,

    #[arg(long = "audit-log", value_name = "FILE", help = "Append an audit entry for this run to a JSON Lines file.")]
    pub audit_log: Option<PathBuf>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[arg(long = "input-file", short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[arg(long, help = "Print the validation result as JSON.")]
    pub json: bool,
}

/// Arguments for the `report` command.
#[derive(Args, Debug)]
pub struct ReportCommand {
    #[arg(long, value_name = "FILE", help = "The text before sanitization.")]
    pub original: PathBuf,

    #[arg(long, value_name = "FILE", help = "The text after sanitization.")]
    pub sanitized: PathBuf,

    #[command(flatten)]
    pub rules: RuleArgs,
}

/// Arguments for the `document` command.
#[derive(Args, Debug)]
pub struct DocumentCommand {
    #[arg(long = "input-file", short = 'i', value_name = "FILE", help = "Read JSON from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[arg(long = "max-length", value_name = "N", env = "DATASAN_MAX_LENGTH", help = "Maximum snippet length in characters before truncation.")]
    pub max_length: Option<usize>,

    #[arg(long = "audit-log", value_name = "FILE", help = "Append one audit entry per document to a JSON Lines file.")]
    pub audit_log: Option<PathBuf>,
}

/// Arguments for the `audit-summary` command.
#[derive(Args, Debug)]
pub struct AuditSummaryCommand {
    #[arg(long = "audit-log", value_name = "FILE", help = "The audit log to summarize.")]
    pub audit_log: PathBuf,
}
