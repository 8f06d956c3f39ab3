// datasan-core/src/engine.rs
//! Defines the core `SanitizationEngine` trait.
//!
//! The trait is the seam between the `Sanitizer` facade (truncation,
//! documents, reports) and the detection mechanics. An engine knows how to
//! find categories in text and how to replace them; it knows nothing about
//! length limits or documents.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeMap, BTreeSet};

use crate::config::RedactionConfig;
use crate::options::SanitizerOptions;
use crate::redaction_match::RedactionMatch;
use crate::sanitizers::compiler::CompiledRules;

/// Core functionality of a sanitization engine.
///
/// Implementations must be pure: no I/O, no interior mutability that changes
/// results, so a single engine can serve any number of threads.
pub trait SanitizationEngine: Send + Sync {
    /// Applies every active rule, in order, over the whole input.
    ///
    /// Each rule runs on the output of the previous one. Returns the redacted
    /// text and the number of replacements per category; every active
    /// category is present in the map, with zero if it never matched.
    fn redact(&self, content: &str) -> (String, BTreeMap<String, usize>);

    /// Scans `content` with every active rule independently, without
    /// replacing anything. Matches are sorted by start offset.
    ///
    /// # Arguments
    /// * `content` - The text to scan.
    /// * `source_id` - An identifier for where the content came from.
    fn find_matches(&self, content: &str, source_id: &str) -> Vec<RedactionMatch>;

    /// Names of the categories with at least one match in `content`.
    fn detect_categories(&self, content: &str) -> BTreeSet<String>;

    /// Per-category match counts using the same ordered pass as `redact`.
    fn count_by_category(&self, content: &str) -> BTreeMap<String, usize> {
        self.redact(content).1
    }

    /// Active category names in application order.
    fn categories(&self) -> Vec<String> {
        self.compiled_rules().names()
    }

    /// Returns the compiled rules used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns the configuration the engine was built from.
    fn get_rules(&self) -> &RedactionConfig;

    /// Returns the engine's options.
    fn get_options(&self) -> &SanitizerOptions;
}
