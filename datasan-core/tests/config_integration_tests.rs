// datasan-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use datasan_core::config::{self, RedactionConfig, RedactionRule};
use datasan_core::Sanitizer;

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_rules() {
    let config = RedactionConfig::load_default_rules().unwrap();
    assert!(config.rules.iter().any(|r| r.name == "email"));
    assert_eq!(config.active_rule_names(), vec!["email", "phone", "ssn"]);

    let card = config.rule("credit_card").unwrap();
    assert!(card.opt_in);
    assert!(card.programmatic_validation);
    assert!(config::validate_rules(&config.rules).is_ok());
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: employee_id
    pattern: "\\bEMP\\d{6}\\b"
    replace_with: "[EMPLOYEE_ID_REDACTED]"
    description: "Internal employee numbers"
    severity: medium
    tags: [internal]
sanitizer:
  max_length: 120
"#,
    )?;
    let config = RedactionConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "employee_id");
    assert!(!config.rules[0].programmatic_validation);
    assert!(!config.rules[0].case_insensitive);
    assert_eq!(config.rules[0].enabled, None);
    assert_eq!(config.sanitizer.max_length, Some(120));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let err = RedactionConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_malformed_yaml_is_an_error() -> Result<()> {
    let file = write_config("rules: [this is: not: valid")?;
    let err = RedactionConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_file_with_pattern_matching_a_token_is_rejected() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: bracket_words
    pattern: "\\[[A-Z_]+\\]"
    replace_with: "[BRACKETS]"
"#,
    )?;
    let err = RedactionConfig::load_from_file(file.path()).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Invalid rules"));
    assert!(msg.contains("matches the token"));
    Ok(())
}

#[test]
fn test_file_with_capture_reference_token_is_rejected() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: keep_domain
    pattern: "\\w+@(\\w+\\.com)"
    replace_with: "[USER]@$1"
"#,
    )?;
    let err = RedactionConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("capture reference"));
    Ok(())
}

#[test]
fn test_merge_user_file_into_defaults() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: ssn
    pattern: "\\b\\d{9}\\b"
    replace_with: "[SSN_REDACTED]"
  - name: employee_id
    pattern: "\\bEMP\\d{6}\\b"
    replace_with: "[EMPLOYEE_ID_REDACTED]"
sanitizer:
  max_length: 80
"#,
    )?;
    let user = RedactionConfig::load_from_file(file.path())?;
    let merged = config::merge_rules(RedactionConfig::load_default_rules()?, Some(user));

    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["email", "phone", "ssn", "credit_card", "employee_id"]);
    assert_eq!(merged.rule("ssn")?.pattern.as_deref(), Some("\\b\\d{9}\\b"));
    assert_eq!(merged.sanitizer.max_length, Some(80));

    let sanitizer = Sanitizer::from_config(merged)?;
    assert_eq!(sanitizer.max_length(), 80);
    assert_eq!(
        sanitizer.sanitize("id EMP123456 ssn 123456789"),
        "id [EMPLOYEE_ID_REDACTED] ssn [SSN_REDACTED]"
    );
    Ok(())
}

#[test]
fn test_enabling_opt_in_rule_activates_luhn_checked_cards() -> Result<()> {
    let mut config = RedactionConfig::load_default_rules()?;
    config.set_active_rules(&["credit_card".to_string()], &["phone".to_string()]);
    assert_eq!(config.active_rule_names(), vec!["email", "ssn", "credit_card"]);

    let sanitizer = Sanitizer::from_config(config)?;
    let out = sanitizer.sanitize("card 4111 1111 1111 1111, not 4111 1111 1111 1112");
    assert_eq!(out, "card [CREDIT_CARD_REDACTED], not 4111 1111 1111 1112");
    Ok(())
}

#[test]
fn test_rules_built_in_code_are_validated() {
    let rules = vec![
        RedactionRule {
            name: "a".to_string(),
            pattern: Some("x*".to_string()),
            replace_with: "[A]".to_string(),
            ..Default::default()
        },
        RedactionRule {
            name: "a".to_string(),
            pattern: Some("(".to_string()),
            replace_with: String::new(),
            ..Default::default()
        },
    ];
    let msg = format!("{:#}", config::validate_rules(&rules).unwrap_err());
    assert!(msg.contains("empty string"));
    assert!(msg.contains("Duplicate rule name"));
    assert!(msg.contains("empty `replace_with`"));
    assert!(msg.contains("invalid regex"));
}
