// File: datasan-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot, non-interactive use of the core.

use anyhow::Result;

use crate::config::RedactionConfig;
use crate::engines::regex_engine::RegexEngine;
use crate::options::SanitizerOptions;
use crate::report::ValidationResult;
use crate::sanitizer::Sanitizer;

/// Sanitizes `content` with the given rules and options in a single call.
///
/// # Arguments
///
/// * `config` - The merged `RedactionConfig` (defaults + optional user overrides).
/// * `options` - `SanitizerOptions` (maximum output length).
/// * `content` - The string to be sanitized.
pub fn headless_sanitize_string(
    config: RedactionConfig,
    options: SanitizerOptions,
    content: &str,
) -> Result<String> {
    let sanitizer = Sanitizer::with_engine(Box::new(RegexEngine::with_options(config, options)?));
    Ok(sanitizer.sanitize(content))
}

/// Sanitizes and validates in one call, returning both results.
pub fn headless_sanitize_checked(
    config: RedactionConfig,
    options: SanitizerOptions,
    content: &str,
) -> Result<(String, ValidationResult)> {
    let sanitizer = Sanitizer::with_engine(Box::new(RegexEngine::with_options(config, options)?));
    let sanitized = sanitizer.sanitize(content);
    let validation = sanitizer.validate_sanitization(&sanitized);
    Ok((sanitized, validation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedactionRule;

    #[test]
    fn test_headless_sanitize_string_custom_rule() -> Result<()> {
        let content = "My email is test@example.com, and another is another@example.net.";
        let config = RedactionConfig {
            rules: vec![RedactionRule {
                name: "email".to_string(),
                pattern: Some("[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\\.[A-Za-z]{2,}".to_string()),
                replace_with: "[EMAIL]".to_string(),
                description: Some("Matches email addresses".to_string()),
                severity: Some("high".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let sanitized = headless_sanitize_string(config, SanitizerOptions::default(), content)?;
        assert_eq!(sanitized, "My email is [EMAIL], and another is [EMAIL].");
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_checked_defaults() -> Result<()> {
        let (sanitized, validation) = headless_sanitize_checked(
            RedactionConfig::load_default_rules()?,
            SanitizerOptions::default().with_max_length(60),
            "SSN 123-45-6789, phone 555.123.4567, and a long tail of text after it",
        )?;
        assert!(sanitized.starts_with("SSN [SSN_REDACTED], phone [PHONE_REDACTED]"));
        assert!(sanitized.ends_with("[TRUNCATED_FOR_PRIVACY]"));
        assert!(validation.is_safe);
        Ok(())
    }
}
