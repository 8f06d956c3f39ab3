// datasan/src/commands/document.rs
//! `datasan document`: allow-listed views of JSON documents.
//!
//! Input is one JSON object or an array of objects. The output keeps that
//! shape. A document whose sanitized view still fails validation is dropped
//! with a warning and the command exits as blocked.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde_json::Value;
use std::io::Write;

use datasan_core::{
    document::{field_text, CONTENT_FIELD},
    AuditLog, Document, SanitizedDocument, Sanitizer, ValidationResult,
};

use crate::cli::DocumentCommand;
use crate::commands::build_sanitizer;
use crate::ui::output_format::{success_msg, warn_msg};
use crate::ui::theme::ThemeMap;
use crate::utils::input::{open_output, read_input};
use crate::Outcome;

/// Splits parsed input into documents, remembering whether it was an array.
fn into_documents(value: Value) -> Result<(Vec<Document>, bool)> {
    match value {
        Value::Object(doc) => Ok((vec![doc], false)),
        Value::Array(items) => {
            let mut docs = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(doc) => docs.push(doc),
                    _ => bail!("Document at index {} is not a JSON object.", idx),
                }
            }
            Ok((docs, true))
        }
        _ => bail!("Expected a JSON object or an array of objects."),
    }
}

/// Validates every carried field of a sanitized view.
fn validate_view(sanitizer: &Sanitizer, view: &SanitizedDocument) -> ValidationResult {
    let mut found = sanitizer.validate_sanitization(&view.snippet).found_pii;
    for field in [view.doc_type.as_deref(), view.date.as_deref()].into_iter().flatten() {
        found.extend(sanitizer.validate_sanitization(field).found_pii);
    }
    ValidationResult::from_categories(found)
}

pub fn run_document(cmd: DocumentCommand, quiet: bool, theme_map: &ThemeMap) -> Result<Outcome> {
    let sanitizer = build_sanitizer(&cmd.rules, cmd.max_length)?;
    let raw = read_input(cmd.input_file.as_ref())?;
    let parsed: Value = serde_json::from_str(&raw).context("Failed to parse input as JSON")?;
    let (documents, is_array) = into_documents(parsed)?;
    debug!("Sanitizing {} document(s).", documents.len());

    let mut audit = cmd.audit_log.as_ref().map(AuditLog::open).transpose()?;

    let mut views = Vec::with_capacity(documents.len());
    let mut dropped = 0;
    for (idx, doc) in documents.iter().enumerate() {
        let view = sanitizer.sanitize_document(doc);
        let validation = validate_view(&sanitizer, &view);

        if let Some(log) = audit.as_mut() {
            let content = doc.get(CONTENT_FIELD).and_then(field_text).unwrap_or_default();
            let report = sanitizer.get_sanitization_report(&content, &view.snippet);
            log.record(&format!("document[{}]", idx), &content, &view.snippet, &report, &validation)?;
        }

        if validation.is_safe {
            views.push(view);
        } else {
            dropped += 1;
            warn!("Dropping document {}: residual PII {:?}.", idx, validation.found_pii);
            warn_msg(
                format!("Document {} still contains PII after sanitization and was dropped.", idx),
                theme_map,
            );
        }
    }

    let rendered = if is_array {
        Some(serde_json::to_string_pretty(&views)?)
    } else {
        views.first().map(serde_json::to_string_pretty).transpose()?
    };

    if let Some(json) = rendered {
        let mut writer = open_output(cmd.output.as_ref())?;
        writeln!(writer, "{}", json)?;
        writer.flush().context("Failed to flush document output")?;
        if let (Some(path), false) = (&cmd.output, quiet) {
            success_msg(
                format!("Wrote {} sanitized document(s) to {}", views.len(), path.display()),
                theme_map,
            );
        }
    }

    Ok(if dropped == 0 {
        Outcome::Success
    } else {
        Outcome::Blocked
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_and_arrays_are_accepted() -> Result<()> {
        let (docs, is_array) = into_documents(json!({ "content": "a" }))?;
        assert_eq!(docs.len(), 1);
        assert!(!is_array);

        let (docs, is_array) = into_documents(json!([{ "content": "a" }, {}]))?;
        assert_eq!(docs.len(), 2);
        assert!(is_array);
        Ok(())
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(into_documents(json!("text")).is_err());
        let err = into_documents(json!([{}, 3])).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn views_are_validated_field_by_field() -> Result<()> {
        let sanitizer = Sanitizer::new()?;
        let view = SanitizedDocument {
            id: "x".to_string(),
            doc_type: Some("a@b.io".to_string()),
            date: None,
            snippet: "clean".to_string(),
        };
        let result = validate_view(&sanitizer, &view);
        assert!(result.found("email"));
        Ok(())
    }
}
