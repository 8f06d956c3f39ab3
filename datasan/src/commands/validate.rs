// datasan/src/commands/validate.rs
//! `datasan validate`: detection only, nothing is rewritten.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use datasan_core::ValidationResult;

use crate::cli::ValidateCommand;
use crate::commands::build_sanitizer;
use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};
use crate::utils::input::{read_input, trim_trailing_newline};
use crate::Outcome;

pub fn run_validate(cmd: ValidateCommand, theme_map: &ThemeMap) -> Result<Outcome> {
    let sanitizer = build_sanitizer(&cmd.rules, None)?;
    let raw = read_input(cmd.input_file.as_ref())?;
    let validation = sanitizer.validate_sanitization(trim_trailing_newline(&raw));

    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let mut writer = stdout.lock();
    if cmd.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&validation)?)?;
    } else {
        print_verdict(&validation, &mut writer, theme_map, colors)?;
    }

    Ok(if validation.is_safe {
        Outcome::Success
    } else {
        Outcome::Unsafe
    })
}

fn print_verdict<W: Write>(
    validation: &ValidationResult,
    writer: &mut W,
    theme_map: &ThemeMap,
    colors: bool,
) -> Result<()> {
    if validation.is_safe {
        write_styled(writer, "SAFE: no PII detected", ThemeEntry::Success, theme_map, colors)?;
    } else {
        let categories: Vec<&str> = validation.found_pii.iter().map(String::as_str).collect();
        let line = format!("UNSAFE: found {}", categories.join(", "));
        write_styled(writer, &line, ThemeEntry::Error, theme_map, colors)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn verdict_lists_categories_in_name_order() {
        let result = ValidationResult::from_categories(
            ["ssn".to_string(), "email".to_string()].into_iter().collect(),
        );
        let mut buf = Vec::new();
        print_verdict(&result, &mut buf, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "UNSAFE: found email, ssn\n");
    }
}
