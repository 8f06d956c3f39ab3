// datasan/src/commands/report.rs
//! `datasan report`: what was removed between two versions of a text.

use anyhow::Result;
use std::io::{self, Write};

use crate::cli::ReportCommand;
use crate::commands::build_sanitizer;
use crate::utils::input::{read_file, trim_trailing_newline};
use crate::Outcome;

pub fn run_report(cmd: ReportCommand) -> Result<Outcome> {
    let sanitizer = build_sanitizer(&cmd.rules, None)?;
    let original = read_file(&cmd.original)?;
    let sanitized = read_file(&cmd.sanitized)?;

    let report = sanitizer.get_sanitization_report(
        trim_trailing_newline(&original),
        trim_trailing_newline(&sanitized),
    );

    let mut out = io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(Outcome::Success)
}
