//! Error types for the skuload transformation pipeline.
//!
//! Errors are split by layer:
//!
//! - [`CsvError`] - file reading, delimiter detection, parsing and header checks
//! - [`TransformError`] - top-level errors returned by [`crate::transform`]
//! - [`ConfigError`] - configuration loading at the caller boundary
//!
//! Every variant here is fatal: the transformation stops and produces no
//! output. Per-field data problems (bad price, bad GTIN) are never errors,
//! they are recorded as warnings in [`crate::logs::TransformLog`].

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while turning raw input into validated rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// No candidate delimiter gave a consistent column count.
    #[error("Could not determine delimiter (tried {tried})")]
    UndetectedDelimiter { tried: String },

    /// The csv reader rejected the data.
    #[error("Invalid CSV format: {0}")]
    Malformed(#[from] csv::Error),

    /// Header present but no data rows.
    #[error("The input CSV file is empty")]
    EmptyInput,

    /// One or more required columns are absent from the header.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// =============================================================================
// Transformation Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform`] and friends.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input could not be read, decoded, parsed or validated.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Output CSV could not be written.
    #[error("Failed to write output CSV: {0}")]
    Output(String),
}

impl From<csv::Error> for TransformError {
    fn from(err: csv::Error) -> Self {
        TransformError::Output(err.to_string())
    }
}

impl<W> From<csv::IntoInnerError<W>> for TransformError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        TransformError::Output(err.error().to_string())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building a [`crate::Config`] at the boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set but not valid unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for the full transformation.
pub type TransformResult<T> = Result<T, TransformError>;
