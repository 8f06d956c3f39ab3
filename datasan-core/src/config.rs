//! Configuration management for `datasan-core`.
//!
//! This module defines the redaction rule data structures and the sanitizer
//! settings block. It handles YAML (de)serialization and provides utilities
//! for loading, merging, filtering and validating rule sets.
//!
//! Rule order is significant everywhere in this module: rules are applied
//! in the order they appear, so loading and merging never reorder them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::errors::DatasanError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Marker appended to text cut down to the configured maximum length.
pub const TRUNCATION_MARKER: &str = "[TRUNCATED_FOR_PRIVACY]";

/// A single redaction rule: a pattern and the literal token that replaces it.
///
/// The rule `name` doubles as the PII category name reported by validation
/// and by sanitization reports (`email`, `phone`, `ssn`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RedactionRule {
    /// Category name, unique within a configuration.
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Literal token substituted for every match. Never expanded.
    pub replace_with: String,
    /// Match letters regardless of case.
    pub case_insensitive: bool,
    /// Enables multi-line mode (`^`/`$` match at line boundaries).
    pub multiline: bool,
    /// If true, the rule is inactive unless explicitly enabled.
    pub opt_in: bool,
    /// If true, every regex match must also pass a programmatic check
    /// (e.g. a Luhn checksum) before it counts.
    pub programmatic_validation: bool,
    /// If true, a match only counts when the characters on either side of
    /// it are not ASCII digits. Used instead of `\b` so that numbers glued
    /// to letters or underscores (`id_123-45-6789`) are still found while
    /// digits inside a longer number are not.
    pub digit_boundaries: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// Severity level (e.g. "high", "critical").
    pub severity: Option<String>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replace_with: "[REDACTED]".to_string(),
            case_insensitive: false,
            multiline: false,
            opt_in: false,
            programmatic_validation: false,
            digit_boundaries: false,
            enabled: None,
            severity: None,
            tags: None,
        }
    }
}

impl RedactionRule {
    /// Whether this rule takes part in sanitization and detection.
    ///
    /// An explicit `enabled` wins; otherwise opt-in rules are off and all
    /// others are on.
    pub fn is_active(&self) -> bool {
        self.enabled.unwrap_or(!self.opt_in)
    }
}

/// Sanitizer-wide settings carried alongside the rules.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct SanitizerSettings {
    /// Maximum length of sanitized text, in characters, before truncation.
    pub max_length: Option<usize>,
}

/// Top-level configuration: the ordered rule list plus sanitizer settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    /// Redaction rules, in application order.
    pub rules: Vec<RedactionRule>,
    #[serde(default)]
    pub sanitizer: SanitizerSettings,
}

/// Error type for a rule name that does not exist in a configuration.
#[derive(Debug)]
pub struct RuleConfigNotFoundError {
    pub config_name: String,
}

impl fmt::Display for RuleConfigNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rule configuration '{}' not found.", self.config_name)
    }
}

impl std::error::Error for RuleConfigNotFoundError {}

impl RedactionConfig {
    /// Loads redaction rules from a YAML file and validates them.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RedactionConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)
            .with_context(|| format!("Invalid rules in {}", path.display()))?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in rules (email, phone, ssn, opt-in credit_card).
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RedactionConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Looks up a rule by name.
    pub fn rule(&self, name: &str) -> Result<&RedactionRule, RuleConfigNotFoundError> {
        self.rules
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RuleConfigNotFoundError { config_name: name.to_string() })
    }

    /// Applies enable/disable lists from the command line.
    ///
    /// Disabled rules are removed. Enabled rules are switched on even when
    /// they are opt-in. Unknown names only produce a warning.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| !disable_set.contains(rule.name.as_str()));
        for rule in self.rules.iter_mut() {
            if enable_set.contains(rule.name.as_str()) {
                rule.enabled = Some(true);
            }
        }

        debug!("Final rules count after filtering: {}", self.rules.len());
    }

    /// Names of the rules that will actually run, in order.
    pub fn active_rule_names(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Merges user-defined rules and settings into the defaults.
///
/// A user rule whose name already exists replaces the default rule in place,
/// keeping its priority. New rules are appended after all defaults, in the
/// order they appear in the user file.
pub fn merge_rules(
    default_config: RedactionConfig,
    user_config: Option<RedactionConfig>,
) -> RedactionConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules = default_config.rules;
    let mut final_settings = default_config.sanitizer;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("User rule '{}' overrides the default rule.", user_rule.name);
                    *existing = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }

        if let Some(user_max) = user_cfg.sanitizer.max_length {
            debug!("Overriding max_length with user value: {}", user_max);
            final_settings.max_length = Some(user_max);
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());

    RedactionConfig {
        rules: final_rules,
        sanitizer: final_settings,
    }
}

/// Validates rule integrity.
///
/// Beyond the structural checks (unique names, compilable patterns), every
/// replacement token and the truncation marker must be invisible to every
/// pattern. Otherwise sanitized output could never validate as clean.
pub fn validate_rules(rules: &[RedactionRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let mut compiled: Vec<(&str, Regex)> = Vec::new();
    let capture_ref = Regex::new(r"\$(\d+|\{[^}]*\})").context("capture reference regex")?;

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.replace_with.is_empty() {
            errors.push(format!("Rule '{}' has an empty `replace_with` token.", rule.name));
        }

        if let Some(cap) = capture_ref.find(&rule.replace_with) {
            errors.push(format!(
                "Rule '{}': replacement must be a literal token, found capture reference '{}'.",
                rule.name,
                cap.as_str()
            ));
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        match RegexBuilder::new(pattern)
            .case_insensitive(rule.case_insensitive)
            .multi_line(rule.multiline)
            .build()
        {
            Ok(regex) if regex.is_match("") => {
                errors.push(format!("Rule '{}' pattern matches the empty string.", rule.name));
            }
            Ok(regex) => compiled.push((rule.name.as_str(), regex)),
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
            }
        }
    }

    let tokens = rules
        .iter()
        .map(|r| r.replace_with.as_str())
        .chain(std::iter::once(TRUNCATION_MARKER));
    for token in tokens {
        for (name, regex) in &compiled {
            if regex.is_match(token) {
                errors.push(format!("Rule '{}' pattern matches the token '{}'.", name, token));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DatasanError::InvalidConfig(errors.join("\n")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str, token: &str) -> RedactionRule {
        RedactionRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            replace_with: token.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_rules_keep_priority_order() {
        let config = RedactionConfig::load_default_rules().unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["email", "phone", "ssn", "credit_card"]);
        assert_eq!(config.sanitizer.max_length, Some(500));
    }

    #[test]
    fn default_rules_pass_validation() {
        let config = RedactionConfig::load_default_rules().unwrap();
        validate_rules(&config.rules).unwrap();
    }

    #[test]
    fn opt_in_rules_are_inactive_by_default() {
        let config = RedactionConfig::load_default_rules().unwrap();
        assert_eq!(config.active_rule_names(), vec!["email", "phone", "ssn"]);
    }

    #[test]
    fn set_active_rules_enables_opt_in_and_drops_disabled() {
        let mut config = RedactionConfig::load_default_rules().unwrap();
        config.set_active_rules(&["credit_card".to_string()], &["phone".to_string()]);
        assert_eq!(config.active_rule_names(), vec!["email", "ssn", "credit_card"]);
    }

    #[test]
    fn merge_replaces_in_place_and_appends_new() {
        let defaults = RedactionConfig {
            rules: vec![rule("email", "a@b", "[E]"), rule("phone", r"\d{10}", "[P]")],
            sanitizer: SanitizerSettings { max_length: Some(500) },
        };
        let user = RedactionConfig {
            rules: vec![rule("mrn", r"MRN-\d+", "[MRN]"), rule("email", "x@y", "[EMAIL]")],
            sanitizer: SanitizerSettings { max_length: Some(120) },
        };
        let merged = merge_rules(defaults, Some(user));
        let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["email", "phone", "mrn"]);
        assert_eq!(merged.rules[0].replace_with, "[EMAIL]");
        assert_eq!(merged.sanitizer.max_length, Some(120));
    }

    #[test]
    fn validation_rejects_capture_references() {
        let err = validate_rules(&[rule("leaky", r"(\d+)", "id=$1")]).unwrap_err();
        assert!(err.to_string().contains("Invalid redaction configuration"));
    }

    #[test]
    fn validation_rejects_token_matched_by_a_pattern() {
        let rules = vec![
            rule("email", "a@b", "[EMAIL_REDACTED]"),
            rule("shout", "[A-Z]{5,}", "[SHOUT]"),
        ];
        assert!(validate_rules(&rules).is_err());
    }

    #[test]
    fn validation_rejects_empty_matching_pattern() {
        assert!(validate_rules(&[rule("empty", r"\d*", "[X]")]).is_err());
    }

    #[test]
    fn missing_rule_lookup_reports_name() {
        let config = RedactionConfig::default();
        let err = config.rule("nope").unwrap_err();
        assert_eq!(err.to_string(), "Rule configuration 'nope' not found.");
    }
}
