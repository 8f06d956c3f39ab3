// datasan/src/ui/redaction_summary.rs
//! Per-category redaction summary table.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::io::Write;

use datasan_core::SanitizationReport;

use crate::ui::output_format::write_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Maps a theme entry to the 256-colour palette index of its ANSI colour.
fn table_color(theme_map: &ThemeMap, entry: ThemeEntry) -> Option<Color> {
    let style = theme_map.get(&entry)?;
    let name = String::from(style.fg.clone()?);
    let (bright, base) = match name.strip_prefix("bright") {
        Some(base) => (8, base.to_string()),
        None => (0, name),
    };
    let index = match base.as_str() {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" => 5,
        "cyan" => 6,
        _ => 7,
    };
    Some(Color::AnsiValue(bright + index))
}

fn styled_cell(text: String, entry: ThemeEntry, theme_map: &ThemeMap) -> Cell {
    let cell = Cell::new(text);
    match table_color(theme_map, entry) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

/// Prints the categories with at least one removal, plus length totals.
pub fn print_summary<W: Write>(
    report: &SanitizationReport,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    write_styled(writer, "Redaction Summary", ThemeEntry::Header, theme_map, enable_colors)?;
    writeln!(writer)?;

    let removed: Vec<(&String, &usize)> = report.pii_removed.iter().filter(|(_, n)| **n > 0).collect();
    if removed.is_empty() {
        writeln!(writer, "No PII was redacted.")?;
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        if enable_colors {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table.set_header(vec!["Category", "Occurrences"]);
        for (category, count) in removed {
            table.add_row(vec![
                styled_cell(category.clone(), ThemeEntry::SummaryRuleName, theme_map),
                styled_cell(count.to_string(), ThemeEntry::SummaryOccurrences, theme_map),
            ]);
        }
        writeln!(writer, "{}", table)?;
    }

    writeln!(
        writer,
        "Length: {} -> {} characters",
        report.original_length, report.sanitized_length
    )?;
    Ok(())
}
