// datasan/src/utils/input.rs
//! Reading command input and writing command output.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Reads the whole input from `path`, or from stdin when `path` is `None`.
pub fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Reads a file that must exist.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Creates the output file, or locks stdout when `path` is `None`.
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Drops one trailing line ending, so piped input round-trips without
/// gaining a blank line.
pub fn trim_trailing_newline(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_exactly_one_line_ending() {
        assert_eq!(trim_trailing_newline("a\n"), "a");
        assert_eq!(trim_trailing_newline("a\r\n"), "a");
        assert_eq!(trim_trailing_newline("a\n\n"), "a\n");
        assert_eq!(trim_trailing_newline("a"), "a");
    }

    #[test]
    fn reads_and_writes_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out.txt");
        {
            let mut writer = open_output(Some(&out))?;
            writeln!(writer, "hello")?;
        }
        assert_eq!(read_input(Some(&out))?, "hello\n");
        assert!(read_file(&dir.path().join("missing.txt")).is_err());
        Ok(())
    }
}
