// datasan-core/src/lib.rs
//! # datasan Core Library
//!
//! `datasan-core` removes personally identifiable information (PII) from text
//! before it leaves a trust boundary, for example before a document snippet
//! is forwarded to an external inference API, and produces machine-checkable
//! evidence that the redaction worked.
//!
//! The library is pure and stateless: it transforms input according to an
//! ordered rule set and never touches the network. The only file access is
//! explicit rule loading and the optional audit log.
//!
//! ## Modules
//!
//! * `config`: `RedactionRule`s, `RedactionConfig`, loading, merging and validation.
//! * `options`: `SanitizerOptions`, the maximum output length.
//! * `sanitizers`: ordered, cached rule compilation.
//! * `engine`: the `SanitizationEngine` trait.
//! * `engines`: concrete engines (`RegexEngine`).
//! * `sanitizer`: the `Sanitizer` facade: sanitize, validate, report.
//! * `document`: allow-listed `SanitizedDocument` views.
//! * `report`: `ValidationResult` and `SanitizationReport`.
//! * `redaction_match`: match records and PII-safe debug logging.
//! * `validators`: programmatic checks (Luhn) for opt-in rules.
//! * `audit_log`: JSON Lines audit trail of sanitization runs.
//! * `headless`: one-shot helpers.
//!
//! ## Redaction order
//!
//! Built-in categories run as email, then phone, then SSN. Each rule sees the
//! output of the previous one, so the digits of `555-123-4567@pager.example.com`
//! are removed as part of the email and never counted as a phone number.
//!
//! ## Usage Example
//!
//! ```rust
//! use datasan_core::Sanitizer;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let sanitizer = Sanitizer::new()?;
//!
//!     let input = "Contact Dr. Smith at john.smith@research-lab.edu or 555-123-4567.";
//!     let sanitized = sanitizer.sanitize(input);
//!     assert_eq!(sanitized, "Contact Dr. Smith at [EMAIL_REDACTED] or [PHONE_REDACTED].");
//!
//!     // Gate: never transmit text that still contains PII.
//!     let validation = sanitizer.validate_sanitization(&sanitized);
//!     assert!(validation.is_safe);
//!
//!     let report = sanitizer.get_sanitization_report(input, &sanitized);
//!     assert_eq!(report.pii_removed["email"], 1);
//!     assert_eq!(report.pii_removed["phone"], 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Sanitization itself never fails. Rule loading and compilation return
//! `anyhow::Result`, with `DatasanError` describing the specific failure.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit_log;
pub mod config;
pub mod document;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod options;
pub mod redaction_match;
pub mod report;
pub mod sanitizer;
pub mod sanitizers;
pub mod validators;

/// Re-exports the configuration types and functions for managing redaction rules.
pub use config::{
    merge_rules,
    validate_rules,
    RedactionConfig,
    RedactionRule,
    RuleConfigNotFoundError,
    SanitizerSettings,
    MAX_PATTERN_LENGTH,
    TRUNCATION_MARKER,
};

pub use errors::DatasanError;

pub use engine::SanitizationEngine;
pub use engines::regex_engine::RegexEngine;

pub use options::{SanitizerOptions, DEFAULT_MAX_LENGTH};

pub use sanitizer::Sanitizer;

pub use document::{Document, SanitizedDocument};

pub use report::{SanitizationReport, ValidationResult};

pub use redaction_match::{redact_sensitive, RedactionMatch};

pub use audit_log::{AuditEntry, AuditLog, AuditOutcome, AuditSummary};

pub use headless::{headless_sanitize_checked, headless_sanitize_string};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
