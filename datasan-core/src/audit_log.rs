// datasan-core/src/audit_log.rs
//! Append-only audit trail of sanitization runs.
//!
//! Each run is one JSON line. Entries carry hashes, counts and the
//! transmit/block decision, never the content itself, so the log can be
//! kept as compliance evidence without becoming a PII store of its own.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::DatasanError;
use crate::report::{SanitizationReport, ValidationResult};

/// What happened to the sanitized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Validation passed; the payload was allowed out.
    Transmitted,
    /// Validation found residual PII; the payload was held back.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub run_id: String,
    pub source_id: String,
    pub input_hash: String,
    pub output_hash: String,
    pub pii_removed: BTreeMap<String, usize>,
    pub original_length: usize,
    pub sanitized_length: usize,
    pub is_safe: bool,
    pub outcome: AuditOutcome,
}

impl AuditEntry {
    pub fn new(
        source_id: &str,
        original: &str,
        sanitized: &str,
        report: &SanitizationReport,
        validation: &ValidationResult,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            run_id: Uuid::new_v4().to_string(),
            source_id: source_id.to_string(),
            input_hash: content_hash(original),
            output_hash: content_hash(sanitized),
            pii_removed: report.pii_removed.clone(),
            original_length: report.original_length,
            sanitized_length: report.sanitized_length,
            is_safe: validation.is_safe,
            outcome: if validation.is_safe {
                AuditOutcome::Transmitted
            } else {
                AuditOutcome::Blocked
            },
        }
    }
}

/// Totals over an audit log file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_runs: usize,
    pub safe_runs: usize,
    pub blocked_runs: usize,
    pub pii_removed: BTreeMap<String, usize>,
}

#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    file: File,
}

impl AuditLog {
    /// Opens `path` for appending, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, entry: &AuditEntry) -> Result<(), DatasanError> {
        let line = serde_json::to_string(entry)
            .map_err(|e| DatasanError::SerializationError(e.to_string()))?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        debug!("Appended audit entry {} to {}", entry.run_id, self.path.display());
        Ok(())
    }

    /// Builds an entry for one run, appends it and returns it.
    pub fn record(
        &mut self,
        source_id: &str,
        original: &str,
        sanitized: &str,
        report: &SanitizationReport,
        validation: &ValidationResult,
    ) -> Result<AuditEntry> {
        let entry = AuditEntry::new(source_id, original, sanitized, report, validation);
        self.append(&entry)
            .with_context(|| format!("Failed to write audit log {}", self.path.display()))?;
        Ok(entry)
    }

    /// Reads every entry of an audit log. Blank lines are skipped.
    pub fn read_entries<P: AsRef<Path>>(path: P) -> Result<Vec<AuditEntry>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = serde_json::from_str(&line).with_context(|| {
                format!("Malformed audit entry at {}:{}", path.display(), idx + 1)
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    pub fn summarize<P: AsRef<Path>>(path: P) -> Result<AuditSummary> {
        let mut summary = AuditSummary::default();
        for entry in Self::read_entries(path)? {
            summary.total_runs += 1;
            match entry.outcome {
                AuditOutcome::Transmitted => summary.safe_runs += 1,
                AuditOutcome::Blocked => summary.blocked_runs += 1,
            }
            for (category, count) in entry.pii_removed {
                *summary.pii_removed.entry(category).or_insert(0) += count;
            }
        }
        Ok(summary)
    }
}

/// Hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
