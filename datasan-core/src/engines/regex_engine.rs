//! A `SanitizationEngine` implementation that uses regular expressions
//! to identify and redact sensitive data.
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::Match;

use crate::config::RedactionConfig;
use crate::engine::SanitizationEngine;
use crate::options::SanitizerOptions;
use crate::redaction_match::{
    canonical_sample_hash, log_redaction_action_debug, log_rejected_candidate_debug, RedactionMatch,
};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};
use crate::validators;

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: RedactionConfig,
    options: SanitizerOptions,
}

impl RegexEngine {
    /// Builds an engine whose options come from the config's `sanitizer` block.
    pub fn new(config: RedactionConfig) -> Result<Self> {
        let options = SanitizerOptions::from(&config.sanitizer);
        Self::with_options(config, options)
    }

    pub fn with_options(config: RedactionConfig, options: SanitizerOptions) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile redaction rules for RegexEngine")?;

        Ok(Self {
            compiled_rules,
            config,
            options,
        })
    }

    fn accepts(&self, compiled_rule: &CompiledRule, haystack: &str, m: &Match<'_>) -> bool {
        (!compiled_rule.digit_boundaries
            || validators::has_digit_boundaries(haystack, m.start(), m.end()))
            && (!compiled_rule.programmatic_validation
                || validators::validate_match(&compiled_rule.name, m.as_str()))
    }

    /// Leftmost accepted matches of one rule, non-overlapping.
    ///
    /// A rejected candidate only moves the search one character forward, so
    /// an acceptable match starting inside it is still found.
    fn accepted_matches<'t>(&self, compiled_rule: &CompiledRule, text: &'t str) -> Vec<Match<'t>> {
        let mut found = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(m) = compiled_rule.regex.find_at(text, pos) else {
                break;
            };
            if self.accepts(compiled_rule, text, &m) {
                pos = if m.end() > m.start() {
                    m.end()
                } else {
                    next_char_boundary(text, m.end())
                };
                found.push(m);
            } else {
                log_rejected_candidate_debug(module_path!(), &compiled_rule.name, m.as_str());
                pos = next_char_boundary(text, m.start());
            }
        }
        found
    }

    /// Replaces every accepted match of one rule with its literal token.
    fn apply_rule(&self, compiled_rule: &CompiledRule, text: &str) -> (String, usize) {
        let matches = self.accepted_matches(compiled_rule, text);
        if matches.is_empty() {
            return (text.to_string(), 0);
        }

        let mut replaced = String::with_capacity(text.len());
        let mut last = 0;
        for m in &matches {
            replaced.push_str(&text[last..m.start()]);
            log_redaction_action_debug(
                module_path!(),
                m.as_str(),
                &compiled_rule.replace_with,
                &compiled_rule.name,
            );
            replaced.push_str(&compiled_rule.replace_with);
            last = m.end();
        }
        replaced.push_str(&text[last..]);
        (replaced, matches.len())
    }
}

/// Byte index just past the char starting at `idx`, or past the end.
fn next_char_boundary(text: &str, idx: usize) -> usize {
    text[idx..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| idx + c.len_utf8())
}

impl SanitizationEngine for RegexEngine {
    fn redact(&self, content: &str) -> (String, BTreeMap<String, usize>) {
        let mut counts = BTreeMap::new();
        let mut current = content.to_string();

        for compiled_rule in &self.compiled_rules.rules {
            let (next, replaced) = self.apply_rule(compiled_rule, &current);
            *counts.entry(compiled_rule.name.clone()).or_insert(0) += replaced;
            current = next;
        }

        (current, counts)
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Vec<RedactionMatch> {
        let mut out = Vec::new();
        for compiled_rule in &self.compiled_rules.rules {
            for m in self.accepted_matches(compiled_rule, content) {
                out.push(RedactionMatch {
                    rule_name: compiled_rule.name.clone(),
                    start: m.start() as u64,
                    end: m.end() as u64,
                    sanitized_string: compiled_rule.replace_with.clone(),
                    sample_hash: Some(canonical_sample_hash(&compiled_rule.name, m.as_str())),
                    source_id: source_id.to_string(),
                });
            }
        }
        out.sort_by_key(|m| (m.start, m.end));
        out
    }

    fn detect_categories(&self, content: &str) -> BTreeSet<String> {
        self.compiled_rules
            .rules
            .iter()
            .filter(|rule| !self.accepted_matches(rule, content).is_empty())
            .map(|rule| rule.name.clone())
            .collect()
    }

    fn compiled_rules(&self) -> &CompiledRules { &self.compiled_rules }
    fn get_rules(&self) -> &RedactionConfig { &self.config }
    fn get_options(&self) -> &SanitizerOptions { &self.options }
}
