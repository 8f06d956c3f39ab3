// datasan/src/ui/output_format.rs
//! Themed status messages on stderr.
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `text` in the colour of `entry`, or plain when colour is off.
pub fn write_styled<W: Write>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    match color_for(theme_map, entry) {
        Some(color) if enable_colors => write!(writer, "{}", text.color(color)),
        _ => write!(writer, "{}", text),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    write_styled(writer, &format!("{}{}", prefix, msg), entry, theme_map, enable_colors)?;
    writeln!(writer)?;
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme_map: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "", msg, ThemeEntry::Info, theme_map, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme_map: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "", msg, ThemeEntry::Success, theme_map, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme_map: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "Warning: ", msg, ThemeEntry::Warn, theme_map, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme_map: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "Error: ", msg, ThemeEntry::Error, theme_map, enable_colors)
}

/// Info message to stderr, coloured when stderr is a terminal.
pub fn info_msg(msg: impl AsRef<str>, theme_map: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_info_message(&mut io::stderr(), msg.as_ref(), theme_map, colors);
}

pub fn success_msg(msg: impl AsRef<str>, theme_map: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_success_message(&mut io::stderr(), msg.as_ref(), theme_map, colors);
}

pub fn warn_msg(msg: impl AsRef<str>, theme_map: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_warn_message(&mut io::stderr(), msg.as_ref(), theme_map, colors);
}

pub fn error_msg(msg: impl AsRef<str>, theme_map: &ThemeMap) {
    let colors = io::stderr().is_terminal();
    let _ = print_error_message(&mut io::stderr(), msg.as_ref(), theme_map, colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_has_prefix_and_no_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", &theme, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Warning: careful\n");
    }

    #[test]
    fn colored_output_wraps_text_in_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", &theme, true).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("Error: boom"));
    }
}
