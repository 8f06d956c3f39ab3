// datasan/src/commands/audit.rs
//! `datasan audit-summary`.

use anyhow::Result;
use std::io::{self, Write};

use datasan_core::AuditLog;

use crate::cli::AuditSummaryCommand;
use crate::Outcome;

pub fn run_audit_summary(cmd: AuditSummaryCommand) -> Result<Outcome> {
    let summary = AuditLog::summarize(&cmd.audit_log)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    Ok(Outcome::Success)
}
