// datasan/src/commands/sanitize.rs
//! `datasan sanitize`: redact, validate, and only then write.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info, warn};
use std::io::{self, Write};

use datasan_core::{AuditLog, Sanitizer};

use crate::cli::SanitizeCommand;
use crate::commands::build_sanitizer;
use crate::ui::output_format::{error_msg, info_msg};
use crate::ui::theme::ThemeMap;
use crate::ui::{diff_viewer, redaction_summary};
use crate::utils::input::{open_output, read_input, trim_trailing_newline};
use crate::Outcome;

pub fn run_sanitize(cmd: SanitizeCommand, quiet: bool, theme_map: &ThemeMap) -> Result<Outcome> {
    info!("Starting sanitize operation.");
    let sanitizer = build_sanitizer(&cmd.rules, cmd.max_length)?;

    let raw = read_input(cmd.input_file.as_ref())?;
    let input = trim_trailing_newline(&raw);
    let source_id = cmd
        .input_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());

    sanitize_and_emit(&sanitizer, input, &source_id, &cmd, quiet, theme_map)
}

fn sanitize_and_emit(
    sanitizer: &Sanitizer,
    input: &str,
    source_id: &str,
    cmd: &SanitizeCommand,
    quiet: bool,
    theme_map: &ThemeMap,
) -> Result<Outcome> {
    let sanitized = sanitizer.sanitize(input);
    let validation = sanitizer.validate_sanitization(&sanitized);
    let report = sanitizer.get_sanitization_report(input, &sanitized);
    debug!(
        "Sanitized {} chars into {} chars; {} match(es) removed.",
        report.original_length,
        report.sanitized_length,
        report.total_removed()
    );

    if let Some(path) = &cmd.audit_log {
        let entry = AuditLog::open(path)?.record(source_id, input, &sanitized, &report, &validation)?;
        debug!("Recorded audit entry {}.", entry.run_id);
    }

    if !validation.is_safe {
        let categories: Vec<&str> = validation.found_pii.iter().map(String::as_str).collect();
        warn!("Blocking output: residual PII in categories {:?}.", categories);
        error_msg(
            format!(
                "Sanitized output still contains PII ({}); nothing was written.",
                categories.join(", ")
            ),
            theme_map,
        );
        return Ok(Outcome::Blocked);
    }

    write_output(input, &sanitized, cmd, quiet, theme_map)?;

    if !cmd.no_summary && !quiet {
        let colors = io::stderr().is_terminal();
        redaction_summary::print_summary(&report, &mut io::stderr(), theme_map, colors)?;
    }

    info!("Sanitize operation completed.");
    Ok(Outcome::Success)
}

fn write_output(
    input: &str,
    sanitized: &str,
    cmd: &SanitizeCommand,
    quiet: bool,
    theme_map: &ThemeMap,
) -> Result<()> {
    if let Some(path) = &cmd.output {
        if !quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()), theme_map);
        }
    }
    let colors = cmd.output.is_none() && io::stdout().is_terminal();
    let mut writer = open_output(cmd.output.as_ref())?;

    if cmd.diff {
        diff_viewer::print_diff(input, sanitized, &mut writer, theme_map, colors)?;
    } else {
        writeln!(writer, "{}", sanitized)?;
    }
    writer.flush().context("Failed to flush sanitized output")?;
    Ok(())
}
