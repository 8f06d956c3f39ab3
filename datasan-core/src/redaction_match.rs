// datasan-core/src/redaction_match.rs
//! Match records and PII-safe debug logging helpers.
//!
//! A `RedactionMatch` locates a detection in the input without carrying the
//! matched text itself; only a normalized hash of it is kept.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single detected span of sensitive data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedactionMatch {
    /// The category (rule name) that matched.
    pub rule_name: String,
    /// Byte offset of the match start in the scanned text.
    pub start: u64,
    /// Byte offset one past the match end.
    pub end: u64,
    /// The token this match is replaced with.
    pub sanitized_string: String,
    /// `canonical_sample_hash` of the matched text.
    #[serde(default)]
    pub sample_hash: Option<String>,
    #[serde(default)]
    pub source_id: String,
}

/// Masks a sensitive value for logs, keeping only its length in characters.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let chars = s.chars().count();
    if chars <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", chars)
    }
}

pub fn log_redaction_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    sanitized_replacement: &str,
    rule_name: &str,
) {
    debug!(
        "{} Redaction action: Original='{}', Redacted='{}' for rule '{}'",
        module_path,
        redact_sensitive(original_sensitive_content),
        sanitized_replacement,
        rule_name
    );
}

pub fn log_rejected_candidate_debug(module_path: &str, rule_name: &str, candidate: &str) {
    debug!(
        "{} Candidate '{}' for rule '{}' failed programmatic validation; left untouched.",
        module_path,
        redact_sensitive(candidate),
        rule_name
    );
}

/// Hash of a match that is stable across case and whitespace differences.
pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123-45-6789"), "[REDACTED: 11 chars]".to_string());
    }

    #[test]
    fn test_redact_sensitive_counts_characters_not_bytes() {
        // 9 characters, 18 bytes.
        assert_eq!(redact_sensitive("ééééééééé"), "[REDACTED: 9 chars]".to_string());
        // 8 characters, 16 bytes: still short.
        assert_eq!(redact_sensitive("éééééééé"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_canonical_sample_hash_consistency() {
        let h1 = canonical_sample_hash("email", "John.Smith@Research-Lab.EDU ");
        let h2 = canonical_sample_hash("email", "john.smith@research-lab.edu");
        assert_eq!(h1, h2);
        assert_ne!(h1, canonical_sample_hash("phone", "john.smith@research-lab.edu"));
    }
}
