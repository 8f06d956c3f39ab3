// datasan/src/commands/mod.rs
//! Subcommand implementations.
//!
//! Every command builds its `Sanitizer` the same way: built-in rules, the
//! optional user rules file merged over them, then the enable/disable lists.

pub mod audit;
pub mod document;
pub mod report;
pub mod sanitize;
pub mod validate;

use anyhow::{Context, Result};
use log::debug;

use datasan_core::{
    merge_rules, validate_rules, RedactionConfig, RegexEngine, Sanitizer, SanitizerOptions,
};

use crate::cli::RuleArgs;

/// Resolves the effective rule set for a command.
pub fn load_rules(rules: &RuleArgs) -> Result<RedactionConfig> {
    let defaults = RedactionConfig::load_default_rules()?;
    let user = rules
        .config
        .as_ref()
        .map(RedactionConfig::load_from_file)
        .transpose()?;

    let mut merged = merge_rules(defaults, user);
    // A user rule may be harmless on its own and still match a built-in token.
    validate_rules(&merged.rules).context("Merged rule set is invalid")?;
    merged.set_active_rules(&rules.enable, &rules.disable);

    debug!("Active rules: {:?}", merged.active_rule_names());
    Ok(merged)
}

/// Builds a sanitizer from rule arguments and an optional length override.
pub fn build_sanitizer(rules: &RuleArgs, max_length: Option<usize>) -> Result<Sanitizer> {
    let config = load_rules(rules)?;
    let mut options = SanitizerOptions::from(&config.sanitizer);
    if let Some(max_length) = max_length {
        options = options.with_max_length(max_length);
    }
    let engine = RegexEngine::with_options(config, options)?;
    Ok(Sanitizer::with_engine(Box::new(engine)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test_log::test]
    fn defaults_without_arguments() -> Result<()> {
        let sanitizer = build_sanitizer(&RuleArgs::default(), None)?;
        assert_eq!(sanitizer.categories(), vec!["email", "phone", "ssn"]);
        assert_eq!(sanitizer.max_length(), 500);
        Ok(())
    }

    #[test_log::test]
    fn command_line_length_wins_over_config_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "rules: []\nsanitizer:\n  max_length: 80")?;
        let rules = RuleArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(build_sanitizer(&rules, None)?.max_length(), 80);
        assert_eq!(build_sanitizer(&rules, Some(20))?.max_length(), 20);
        Ok(())
    }

    #[test_log::test]
    fn user_rule_matching_a_built_in_token_is_rejected() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            "rules:\n  - name: tokens\n    pattern: 'EMAIL_[A-Z]+'\n    replace_with: '[quiet]'"
        )?;
        let rules = RuleArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = build_sanitizer(&rules, None).unwrap_err();
        assert!(format!("{:#}", err).contains("Merged rule set is invalid"));
        Ok(())
    }

    #[test_log::test]
    fn enable_and_disable_lists_apply() -> Result<()> {
        let rules = RuleArgs {
            enable: vec!["credit_card".to_string()],
            disable: vec!["ssn".to_string()],
            ..Default::default()
        };
        let sanitizer = build_sanitizer(&rules, None)?;
        assert_eq!(sanitizer.categories(), vec!["email", "phone", "credit_card"]);
        Ok(())
    }
}
