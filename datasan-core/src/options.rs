//! Runtime options for the sanitizer.
//!
//! The core has exactly one tunable: the maximum length, in characters, of
//! sanitized text before it is truncated.

use serde::{Deserialize, Serialize};

use crate::config::SanitizerSettings;

/// Default maximum length of sanitized text, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerOptions {
    pub max_length: usize,
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        Self { max_length: DEFAULT_MAX_LENGTH }
    }
}

impl SanitizerOptions {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

impl From<&SanitizerSettings> for SanitizerOptions {
    fn from(settings: &SanitizerSettings) -> Self {
        Self {
            max_length: settings.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
        }
    }
}
