//! # Skuload - product export to variant-grouped inventory
//!
//! Skuload reads a shop's product-export CSV and rewrites it for an
//! inventory tool that models size variants as items of an item group.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Product CSV │────▶│   Parser    │────▶│   Grouper   │────▶│   Emitter   │
//! │  (any sep)  │     │ (auto-sep)  │     │ (base SKU)  │     │ (item rows) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                                         size / price / GTIN
//!                                                             derivation
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use skuload::{transform, Config};
//!
//! let output = transform(&csv_text, &Config::default())?;
//! println!("{} items, {} warnings", output.info.output_rows, output.warnings().count());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (InputRow, Group, OutputRow, GtinValue)
//! - [`config`] - Per-call settings and their defaults
//! - [`logs`] - Per-call log of info and warning entries
//! - [`parser`] - Decoding and CSV parsing with delimiter detection
//! - [`validation`] - Required-column checks
//! - [`transform`] - Grouping, field derivation, emission and pipeline

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;
pub mod validation;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, CsvError, CsvResult, TransformError, TransformResult};

// =============================================================================
// Re-exports - Models & config
// =============================================================================

pub use config::Config;
pub use logs::{LogEntry, LogLevel, TransformLog};
pub use models::{base_sku, Group, GtinValue, InputRow, OutputRow, OUTPUT_COLUMNS, REQUIRED_COLUMNS};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_bytes_auto, decode_content, detect_delimiter, detect_encoding, parse, strip_bom,
    ParseResult,
};
pub use validation::{missing_columns, validate_columns};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    extract_size, group_by_base_sku, process_price, validate_gtin,
    pipeline::{transform, transform_bytes, transform_file, CsvInfo, TransformOutput},
};
