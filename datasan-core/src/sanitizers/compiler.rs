//! compiler.rs - Manages the compilation and caching of redaction rules.
//!
//! This module converts the active rules of a `RedactionConfig` into
//! `CompiledRules`, preserving their order. Compiled sets are kept in a
//! global, shared cache so that repeated sanitizers over the same rules do
//! not recompile them.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{RedactionConfig, RedactionRule, MAX_PATTERN_LENGTH};
use crate::errors::DatasanError;

/// A single compiled redaction rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The literal token that replaces every accepted match.
    pub replace_with: String,
    /// The rule (category) name.
    pub name: String,
    /// Whether matches must also pass a programmatic validator.
    pub programmatic_validation: bool,
    /// Whether matches must not touch an ASCII digit on either side.
    pub digit_boundaries: bool,
}

/// The ordered collection of compiled rules applied during sanitization.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    /// Category names in application order.
    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name.clone()).collect()
    }
}

/// A cached compilation together with the rules it was built from.
///
/// The key is only a hash, so a hit is confirmed against `rules`.
struct CacheEntry {
    rules: Vec<RedactionRule>,
    compiled: Arc<CompiledRules>,
}

lazy_static! {
    /// Compiled rule sets keyed by a hash of the ordered rule list.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, CacheEntry>> = RwLock::new(HashMap::new());
}

/// Hashes the rule list for the cache key.
///
/// Rules are hashed in their configured order: two configs with the same
/// rules in a different order redact differently.
fn hash_config(config: &RedactionConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles the active rules of `rules_to_compile`, in order.
///
/// Inactive rules (disabled, or opt-in and not enabled) are skipped. All
/// compilation failures are collected and reported together.
pub fn compile_rules(rules_to_compile: Vec<RedactionRule>) -> Result<CompiledRules, DatasanError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_active() {
            debug!("Skipping inactive rule '{}'.", &rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(DatasanError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .case_insensitive(rule.case_insensitive)
            .multi_line(rule.multiline)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "datasan_core::sanitizer",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with,
                    name: rule.name,
                    programmatic_validation: rule.programmatic_validation,
                    digit_boundaries: rule.digit_boundaries,
                });
            }
            Err(e) => {
                compilation_errors.push(DatasanError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(DatasanError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

/// Gets a `CompiledRules` instance from the cache or compiles it.
///
/// A cached entry is only reused when its rule list equals `config.rules`.
/// On a hash collision the entry is replaced by the new compilation.
pub fn get_or_compile_rules(config: &RedactionConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| anyhow!("compiled rule cache lock poisoned"))?;
        match cache.get(&cache_key) {
            Some(entry) if entry.rules == config.rules => {
                debug!("Serving compiled rules from cache for key: {}", &cache_key);
                return Ok(Arc::clone(&entry.compiled));
            }
            Some(_) => warn!("Compiled rule cache collision for key {}; recompiling.", &cache_key),
            None => debug!("Compiled rules not found in cache. Compiling now."),
        }
    }

    let compiled_arc = Arc::new(compile_rules(config.rules.clone())?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|_| anyhow!("compiled rule cache lock poisoned"))?
        .insert(
            cache_key,
            CacheEntry {
                rules: config.rules.clone(),
                compiled: Arc::clone(&compiled_arc),
            },
        );

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str) -> RedactionRule {
        RedactionRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            replace_with: format!("[{}]", name.to_uppercase()),
            ..Default::default()
        }
    }

    #[test]
    fn compiles_in_configured_order() {
        let compiled = compile_rules(vec![rule("b", "b+"), rule("a", "a+")]).unwrap();
        assert_eq!(compiled.names(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn skips_inactive_rules() {
        let mut opt_in = rule("card", r"\d{16}");
        opt_in.opt_in = true;
        let mut disabled = rule("ssn", r"\d{9}");
        disabled.enabled = Some(false);
        let compiled = compile_rules(vec![opt_in, disabled, rule("email", "@")]).unwrap();
        assert_eq!(compiled.names(), vec!["email".to_string()]);
    }

    #[test]
    fn reports_every_broken_rule() {
        let err = compile_rules(vec![rule("one", "("), rule("two", "[")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to compile 2 rule(s)"));
        assert!(message.contains("'one'"));
        assert!(message.contains("'two'"));
    }

    #[test]
    fn rejects_overlong_patterns() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = compile_rules(vec![rule("long", &long)]).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum allowed"));
    }

    #[test]
    fn cache_key_depends_on_order() {
        let forward = RedactionConfig {
            rules: vec![rule("a", "a"), rule("b", "b")],
            ..Default::default()
        };
        let reversed = RedactionConfig {
            rules: vec![rule("b", "b"), rule("a", "a")],
            ..Default::default()
        };
        assert_ne!(hash_config(&forward), hash_config(&reversed));

        let first = get_or_compile_rules(&forward).unwrap();
        let again = get_or_compile_rules(&forward).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn colliding_cache_key_does_not_serve_foreign_rules() {
        let wanted = RedactionConfig {
            rules: vec![rule("collision_wanted", "w+")],
            ..Default::default()
        };
        let foreign = Arc::new(compile_rules(vec![rule("collision_foreign", "f+")]).unwrap());

        // Plant a different rule set under the key of `wanted`.
        COMPILED_RULES_CACHE.write().unwrap().insert(
            hash_config(&wanted),
            CacheEntry {
                rules: vec![rule("collision_foreign", "f+")],
                compiled: Arc::clone(&foreign),
            },
        );

        let compiled = get_or_compile_rules(&wanted).unwrap();
        assert_eq!(compiled.names(), vec!["collision_wanted".to_string()]);
        assert!(!Arc::ptr_eq(&compiled, &foreign));

        let again = get_or_compile_rules(&wanted).unwrap();
        assert!(Arc::ptr_eq(&compiled, &again));
    }
}
