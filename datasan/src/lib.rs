// datasan/src/lib.rs
//! # datasan CLI
//!
//! Command-line front end for `datasan-core`: sanitize text and JSON
//! documents, check text for residual PII, and summarize audit logs.
//!
//! The binary is a thin wrapper around [`run`]; everything is exposed as a
//! library so integration tests can drive commands without a subprocess.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::ui::theme::build_theme_map;

/// Process exit status for a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything was clean.
    Success,
    /// `validate` found residual PII.
    Unsafe,
    /// `sanitize` refused to emit output that still failed validation.
    Blocked,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Unsafe => ExitCode::from(1),
            Outcome::Blocked => ExitCode::from(2),
        }
    }
}

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<Outcome> {
    let theme_map = build_theme_map(cli.theme.as_ref())?;

    match cli.command {
        Commands::Sanitize(cmd) => commands::sanitize::run_sanitize(cmd, cli.quiet, &theme_map),
        Commands::Validate(cmd) => commands::validate::run_validate(cmd, &theme_map),
        Commands::Report(cmd) => commands::report::run_report(cmd),
        Commands::Document(cmd) => commands::document::run_document(cmd, cli.quiet, &theme_map),
        Commands::AuditSummary(cmd) => commands::audit::run_audit_summary(cmd),
    }
}
