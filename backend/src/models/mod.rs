//! Domain models for the skuload transformation pipeline.
//!
//! - [`InputRow`] - one product-export row (required columns only)
//! - [`Group`] - rows sharing a base SKU, main item first
//! - [`OutputRow`] - one inventory item in the 19-column output schema
//! - [`GtinValue`] - validated barcode data

use serde::Serialize;
use std::fmt;

// =============================================================================
// Column Names
// =============================================================================

pub const COL_SKU: &str = "Product SKU";
pub const COL_NAME: &str = "Product Name";
pub const COL_STOCK: &str = "Stock";
pub const COL_MPN: &str = "MPN";
pub const COL_GTIN: &str = "GTIN";
pub const COL_PRICE: &str = "Price";
pub const COL_STATUS: &str = "Status";

/// Columns every input file must carry. Order is the order missing columns
/// are reported in.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_SKU, COL_NAME, COL_STOCK, COL_MPN, COL_GTIN, COL_PRICE, COL_STATUS,
];

/// Output header, in emission order.
pub const OUTPUT_COLUMNS: [&str; 19] = [
    "Entry Type",
    "Entry Name",
    "Item Group Name",
    "Attribute 1 Name",
    "Attribute 1 Option",
    "Attribute 2 Name",
    "Attribute 2 Option",
    "Quantity",
    "Unit",
    "Min Level",
    "Price",
    "Notes",
    "Tags",
    "Primary Folder",
    "Subfolder-level1",
    "Subfolder-level2",
    "Serial Number",
    "Barcode/QR2-Data",
    "Barcode/QR2-Type",
];

// =============================================================================
// Input
// =============================================================================

/// A parsed product-export row.
///
/// Only the required columns are kept; anything else in the file is dropped
/// at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRow {
    /// 1-based line of the record in the source text.
    pub line: u64,
    pub sku: String,
    pub name: String,
    pub stock: String,
    pub mpn: String,
    pub gtin: String,
    pub price: String,
    pub status: String,
}

impl InputRow {
    /// Portion of the SKU before the first hyphen, or the whole SKU.
    pub fn base_sku(&self) -> &str {
        base_sku(&self.sku)
    }
}

/// Base SKU of a raw SKU string.
///
/// ```ignore
/// assert_eq!(base_sku("GRIP-S"), "GRIP");
/// assert_eq!(base_sku("GRIP"), "GRIP");
/// ```
pub fn base_sku(sku: &str) -> &str {
    sku.split_once('-').map_or(sku, |(base, _)| base)
}

// =============================================================================
// Group
// =============================================================================

/// Rows sharing one base SKU.
///
/// Never empty: a group is created from its main item and variants are
/// appended behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub base_sku: String,
    items: Vec<InputRow>,
}

impl Group {
    pub fn new(main: InputRow) -> Self {
        Self {
            base_sku: main.base_sku().to_string(),
            items: vec![main],
        }
    }

    pub fn push(&mut self, variant: InputRow) {
        self.items.push(variant);
    }

    /// The first row seen for this base SKU.
    pub fn main_item(&self) -> &InputRow {
        &self.items[0]
    }

    /// Every row after the main item, in input order.
    pub fn variants(&self) -> &[InputRow] {
        &self.items[1..]
    }

    pub fn items(&self) -> &[InputRow] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: groups are built from their main item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// GTIN
// =============================================================================

/// Barcode data after lenient validation.
///
/// Integer-parseable GTINs become numbers (leading zeros are lost on the
/// way); everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GtinValue {
    Number(i128),
    Raw(String),
}

impl fmt::Display for GtinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GtinValue::Number(n) => write!(f, "{}", n),
            GtinValue::Raw(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// One inventory item in the target catalog format.
///
/// Field order matches [`OUTPUT_COLUMNS`]; the csv writer relies on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Entry Type")]
    pub entry_type: &'static str,
    #[serde(rename = "Entry Name")]
    pub entry_name: String,
    #[serde(rename = "Item Group Name")]
    pub item_group_name: String,
    #[serde(rename = "Attribute 1 Name")]
    pub attribute1_name: &'static str,
    #[serde(rename = "Attribute 1 Option")]
    pub attribute1_option: &'static str,
    #[serde(rename = "Attribute 2 Name")]
    pub attribute2_name: &'static str,
    #[serde(rename = "Attribute 2 Option")]
    pub attribute2_option: &'static str,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Unit")]
    pub unit: &'static str,
    #[serde(rename = "Min Level")]
    pub min_level: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Primary Folder")]
    pub primary_folder: String,
    #[serde(rename = "Subfolder-level1")]
    pub subfolder_level1: String,
    #[serde(rename = "Subfolder-level2")]
    pub subfolder_level2: String,
    #[serde(rename = "Serial Number")]
    pub serial_number: String,
    #[serde(rename = "Barcode/QR2-Data")]
    pub barcode_data: GtinValue,
    #[serde(rename = "Barcode/QR2-Type")]
    pub barcode_type: &'static str,
}
