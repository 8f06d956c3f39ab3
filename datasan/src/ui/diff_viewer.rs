// datasan/src/ui/diff_viewer.rs
//! Line diff between original and sanitized text.
//!
//! Removed lines are shown in the `diff_removed` colour, their sanitized
//! replacements in `diff_added`. Only hunks are printed, so unchanged
//! context far from any redaction is not repeated.
//!
//! A removed line is the raw input and may hold PII, so it is written
//! masked (`[REDACTED: N chars]`). Context lines are identical on both
//! sides and therefore already sanitized.

use anyhow::Result;
use datasan_core::redact_sensitive;
use diffy::{create_patch, Line as DiffLine};
use std::io::Write;

use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let patch = create_patch(original, sanitized);

    write_styled(writer, "--- original", ThemeEntry::DiffHeader, theme_map, enable_colors)?;
    writeln!(writer)?;
    write_styled(writer, "+++ sanitized", ThemeEntry::DiffHeader, theme_map, enable_colors)?;
    writeln!(writer)?;

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes detected.")?;
        return Ok(());
    }

    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    let text = format!("-{}", redact_sensitive(s.trim_end_matches('\n')));
                    write_styled(writer, &text, ThemeEntry::DiffRemoved, theme_map, enable_colors)?;
                }
                DiffLine::Insert(s) => {
                    let text = format!("+{}", s.trim_end_matches('\n'));
                    write_styled(writer, &text, ThemeEntry::DiffAdded, theme_map, enable_colors)?;
                }
                DiffLine::Context(s) => write!(writer, " {}", s.trim_end_matches('\n'))?,
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    fn render(original: &str, sanitized: &str) -> String {
        let mut buf = Vec::new();
        print_diff(original, sanitized, &mut buf, &ThemeStyle::default_theme_map(), false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn shows_removed_and_added_lines() {
        let out = render("hello\nmail a@b.io\n", "hello\nmail [EMAIL_REDACTED]\n");
        assert!(!out.contains("a@b.io"));
        assert!(out.contains("-[REDACTED: 11 chars]"));
        assert!(out.contains("+mail [EMAIL_REDACTED]"));
        assert!(out.contains(" hello"));
    }

    #[test]
    fn short_removed_lines_are_masked_without_length() {
        let out = render("a@b.io\n", "[EMAIL_REDACTED]\n");
        assert!(!out.contains("a@b.io"));
        assert!(out.contains("-[REDACTED]\n"));
    }

    #[test]
    fn identical_inputs_report_no_changes() {
        let out = render("same\n", "same\n");
        assert!(out.contains("No changes detected."));
    }
}
