//! Header validation for product-export files.
//!
//! The required column set is checked once per file, before any row is
//! looked at. A file missing any of them is rejected as a whole and every
//! missing name is reported, so the user can fix the export in one go.
//!
//! # Example
//!
//! ```rust,ignore
//! use skuload::validation::{missing_columns, validate_columns};
//!
//! let headers: Vec<String> = ["Product SKU", "Product Name", "Stock", "Price"]
//!     .iter().map(|s| s.to_string()).collect();
//!
//! assert_eq!(missing_columns(&headers), vec!["MPN", "GTIN", "Status"]);
//! assert!(validate_columns(&headers).is_err());
//! ```

use csv::StringRecord;

use crate::error::{CsvError, CsvResult};
use crate::models::{
    InputRow, COL_GTIN, COL_MPN, COL_NAME, COL_PRICE, COL_SKU, COL_STATUS, COL_STOCK,
    REQUIRED_COLUMNS,
};

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    sku: usize,
    name: usize,
    stock: usize,
    mpn: usize,
    gtin: usize,
    price: usize,
    status: usize,
}

impl ColumnIndex {
    /// Build an [`InputRow`] from a record.
    ///
    /// Cells past the end of a short record read as empty strings.
    pub fn row(&self, record: &StringRecord, line: u64) -> InputRow {
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        InputRow {
            line,
            sku: cell(self.sku),
            name: cell(self.name),
            stock: cell(self.stock),
            mpn: cell(self.mpn),
            gtin: cell(self.gtin),
            price: cell(self.price),
            status: cell(self.status),
        }
    }
}

/// Position of a column. With duplicate names the last one wins.
fn position(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().rposition(|h| h == column)
}

/// Required columns absent from `headers`, in required-column order.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| position(headers, col).is_none())
        .map(|col| col.to_string())
        .collect()
}

/// Check the header and locate every required column.
pub fn validate_columns(headers: &[String]) -> CsvResult<ColumnIndex> {
    let missing = missing_columns(headers);
    if !missing.is_empty() {
        return Err(CsvError::MissingColumns(missing));
    }

    let at = |col: &str| position(headers, col).ok_or_else(|| CsvError::MissingColumns(vec![col.to_string()]));
    Ok(ColumnIndex {
        sku: at(COL_SKU)?,
        name: at(COL_NAME)?,
        stock: at(COL_STOCK)?,
        mpn: at(COL_MPN)?,
        gtin: at(COL_GTIN)?,
        price: at(COL_PRICE)?,
        status: at(COL_STATUS)?,
    })
}
