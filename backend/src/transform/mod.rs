//! Transformation module.
//!
//! This module turns parsed product rows into inventory items:
//! - Grouper: rows to item groups by base SKU
//! - Derive: size, price and GTIN derivation
//! - Emitter: item rows and CSV output
//! - Pipeline: main transformation entry points

pub mod derive;
pub mod emitter;
pub mod grouper;
pub mod pipeline;

pub use derive::{extract_size, process_price, validate_gtin};
pub use emitter::{build_rows, emit, write_csv};
pub use grouper::group_by_base_sku;
pub use pipeline::*;
