//! errors.rs - Custom error types for the datasan-core library.
//!
//! Residual PII is not an error: it is reported as a `ValidationResult`.
//! The variants below cover rule configuration, compilation and audit I/O.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error kinds raised by `datasan-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DatasanError {
    #[error("Failed to compile redaction rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid redaction configuration:\n{0}")]
    InvalidConfig(String),

    #[error("Failed to serialize audit entry: {0}")]
    SerializationError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
