//! The `Sanitizer`: PII redaction, truncation, validation and reporting.
//!
//! This is the surface callers use before text leaves the trust boundary:
//!
//! 1. `sanitize_text` / `sanitize_document` to produce the outbound payload,
//! 2. `validate_sanitization` as the gate (an unsafe result must block it),
//! 3. `get_sanitization_report` for the audit trail.
//!
//! Every operation is pure. A `Sanitizer` holds only immutable compiled
//! rules and may be shared freely across threads.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::{debug, warn};

use crate::config::{RedactionConfig, TRUNCATION_MARKER};
use crate::document::{self, Document, SanitizedDocument};
use crate::engine::SanitizationEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::options::SanitizerOptions;
use crate::report::{SanitizationReport, ValidationResult};

/// Upper bound on redaction passes over one text. One pass is enough for
/// valid rule sets; further passes only run while detections remain.
const MAX_REDACTION_PASSES: usize = 3;

/// Upper bound on cut-and-rescan rounds during truncation.
const MAX_TRUNCATION_PASSES: usize = 4;

pub struct Sanitizer {
    engine: Box<dyn SanitizationEngine>,
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("categories", &self.engine.categories())
            .field("options", self.engine.get_options())
            .finish()
    }
}

impl Sanitizer {
    /// Built-in rules, default options (`max_length` 500).
    pub fn new() -> Result<Self> {
        Self::from_config(RedactionConfig::load_default_rules()?)
    }

    /// Built-in rules with a custom maximum length.
    pub fn with_max_length(max_length: usize) -> Result<Self> {
        let engine = RegexEngine::with_options(
            RedactionConfig::load_default_rules()?,
            SanitizerOptions::default().with_max_length(max_length),
        )?;
        Ok(Self::with_engine(Box::new(engine)))
    }

    /// Builds a regex-backed sanitizer; options come from `config.sanitizer`.
    pub fn from_config(config: RedactionConfig) -> Result<Self> {
        Ok(Self::with_engine(Box::new(RegexEngine::new(config)?)))
    }

    pub fn with_engine(engine: Box<dyn SanitizationEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &dyn SanitizationEngine {
        self.engine.as_ref()
    }

    /// The configured maximum output length, in characters.
    pub fn max_length(&self) -> usize {
        self.engine.get_options().max_length
    }

    /// Active category names, in priority order.
    pub fn categories(&self) -> Vec<String> {
        self.engine.categories()
    }

    /// `sanitize_text` with the configured maximum length.
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitize_text(text, self.max_length())
    }

    /// Redacts every category over the full text, then enforces `max_length`.
    ///
    /// When the redacted text is longer than `max_length` characters it is
    /// cut to `max_length` characters and `[TRUNCATED_FOR_PRIVACY]` is
    /// appended, so the output is never longer than
    /// `max_length + TRUNCATION_MARKER.chars().count()`.
    pub fn sanitize_text(&self, text: &str, max_length: usize) -> String {
        let mut body = self.redact_stable(text);
        if char_len(&body) <= max_length {
            return body;
        }

        // A cut can complete a match (e.g. "555-123-45678" cut after "4567"),
        // so the cut body is redacted again until it is stable and fits.
        let mut passes = 0;
        while char_len(&body) > max_length {
            if passes == MAX_TRUNCATION_PASSES {
                warn!(
                    "Truncation did not settle after {} passes; cutting without rescan.",
                    MAX_TRUNCATION_PASSES
                );
                body = truncate_chars(&body, max_length).to_string();
                break;
            }
            let cut = truncate_chars(&body, max_length);
            body = self.redact_stable(cut);
            passes += 1;
        }
        debug!("Truncated sanitized text to {} chars in {} pass(es).", max_length, passes);

        body.push_str(TRUNCATION_MARKER);
        body
    }

    /// Builds the allow-listed view of `doc`.
    ///
    /// Only `type`, `date` and a sanitized `snippet` of `content` are carried
    /// over, plus a fresh random `id`. `type` and `date` are redacted too
    /// (without truncation); everything else is dropped.
    pub fn sanitize_document(&self, doc: &Document) -> SanitizedDocument {
        let content = doc
            .get(document::CONTENT_FIELD)
            .and_then(document::field_text)
            .unwrap_or_default();

        let dropped = doc
            .keys()
            .filter(|k| {
                ![document::CONTENT_FIELD, document::TYPE_FIELD, document::DATE_FIELD]
                    .contains(&k.as_str())
            })
            .count();
        debug!("Sanitizing document: {} field(s) not on the allow-list dropped.", dropped);

        SanitizedDocument {
            id: document::fresh_document_id(doc.get(document::ID_FIELD)),
            doc_type: doc
                .get(document::TYPE_FIELD)
                .and_then(document::field_text)
                .map(|t| self.redact_stable(&t)),
            date: doc
                .get(document::DATE_FIELD)
                .and_then(document::field_text)
                .map(|d| self.redact_stable(&d)),
            snippet: self.sanitize(&content),
        }
    }

    /// Re-runs detection, without replacing, and reports what is left.
    pub fn validate_sanitization(&self, text: &str) -> ValidationResult {
        let found = self.engine.detect_categories(text);
        if !found.is_empty() {
            debug!("Validation found residual PII categories: {:?}", found);
        }
        ValidationResult::from_categories(found)
    }

    /// Counts removed matches per category by diffing ordered match counts
    /// of `original` and `sanitized`.
    pub fn get_sanitization_report(&self, original: &str, sanitized: &str) -> SanitizationReport {
        let before = self.engine.count_by_category(original);
        let after = self.engine.count_by_category(sanitized);

        let pii_removed = before
            .into_iter()
            .map(|(category, count)| {
                let remaining = after.get(&category).copied().unwrap_or(0);
                (category, count.saturating_sub(remaining))
            })
            .collect();

        SanitizationReport {
            pii_removed,
            original_length: char_len(original),
            sanitized_length: char_len(sanitized),
        }
    }

    fn redact_stable(&self, text: &str) -> String {
        let (mut current, _) = self.engine.redact(text);
        for _ in 1..MAX_REDACTION_PASSES {
            if self.engine.detect_categories(&current).is_empty() {
                break;
            }
            current = self.engine.redact(&current).0;
        }
        current
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The prefix of `s` holding at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn cut_that_completes_a_phone_number_is_rescanned() {
        let sanitizer = Sanitizer::new().unwrap();
        // "555-123-45678" is not a phone number; its first 12 chars are.
        let out = sanitizer.sanitize_text("555-123-45678", 12);
        assert!(!out.contains("555-123-4567"));
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert!(sanitizer.validate_sanitization(&out).is_safe);
        assert!(char_len(&out) <= 12 + char_len(TRUNCATION_MARKER));
    }

    #[test]
    fn zero_max_length_keeps_only_the_marker() {
        let sanitizer = Sanitizer::new().unwrap();
        assert_eq!(sanitizer.sanitize_text("hello", 0), TRUNCATION_MARKER);
        assert_eq!(sanitizer.sanitize_text("", 0), "");
    }

    #[test]
    fn debug_output_lists_categories_not_content() {
        let sanitizer = Sanitizer::with_max_length(42).unwrap();
        let rendered = format!("{:?}", sanitizer);
        assert!(rendered.contains("email"));
        assert!(rendered.contains("42"));
    }
}
