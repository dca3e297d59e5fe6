//! Assemble inventory item rows and write them as CSV.
//!
//! Each variant of a group becomes one item. Name and price come from the
//! group's main item; size, stock, status, MPN and GTIN come from the
//! variant itself. The main item never gets a row of its own.

use csv::{Terminator, WriterBuilder};

use super::derive::{extract_size, process_price, validate_gtin};
use crate::config::Config;
use crate::error::TransformResult;
use crate::logs::TransformLog;
use crate::models::{Group, InputRow, OutputRow, OUTPUT_COLUMNS};

pub const ENTRY_TYPE: &str = "Item";
pub const SIZE_ATTRIBUTE: &str = "Size";
pub const COLOR_ATTRIBUTE: &str = "Color";
pub const COLOR_UNSPECIFIED: &str = "Not Specified";
pub const UNIT: &str = "Unit";
pub const BARCODE_TYPE: &str = "org.iso.Code128";

/// Build the item row for one variant.
pub fn build_row(
    main: &InputRow,
    variant: &InputRow,
    config: &Config,
    log: &mut TransformLog,
) -> OutputRow {
    OutputRow {
        entry_type: ENTRY_TYPE,
        entry_name: main.name.clone(),
        item_group_name: main.name.clone(),
        attribute1_name: SIZE_ATTRIBUTE,
        attribute1_option: extract_size(&variant.name),
        attribute2_name: COLOR_ATTRIBUTE,
        attribute2_option: COLOR_UNSPECIFIED,
        quantity: variant.stock.clone(),
        unit: UNIT,
        min_level: config.min_level.clone(),
        price: process_price(&main.price, &main.name, log),
        notes: variant.status.clone(),
        tags: config.tags.clone(),
        primary_folder: config.primary_folder.clone(),
        subfolder_level1: config.subfolder_level1.clone(),
        subfolder_level2: config.subfolder_level2.clone(),
        serial_number: variant.mpn.clone(),
        barcode_data: validate_gtin(&variant.gtin, &main.name, log),
        barcode_type: BARCODE_TYPE,
    }
}

/// Item rows for every variant of every group, in group order.
pub fn build_rows(groups: &[Group], config: &Config, log: &mut TransformLog) -> Vec<OutputRow> {
    let mut rows = Vec::new();
    for group in groups {
        let main = group.main_item();
        for variant in group.variants() {
            rows.push(build_row(main, variant, config, log));
        }
    }
    rows
}

/// Serialize item rows as comma-separated CSV with a header row.
///
/// The header is written even when there are no rows.
pub fn write_csv(rows: &[OutputRow]) -> TransformResult<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::CRLF)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner()?;
    // Every cell came from a &str, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build and serialize the output for a set of groups.
pub fn emit(groups: &[Group], config: &Config, log: &mut TransformLog) -> TransformResult<(String, usize)> {
    let rows = build_rows(groups, config, log);
    let csv = write_csv(&rows)?;
    Ok((csv, rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GtinValue;
    use crate::transform::grouper::group_by_base_sku;

    fn item(sku: &str, name: &str, price: &str, gtin: &str) -> InputRow {
        InputRow {
            line: 0,
            sku: sku.to_string(),
            name: name.to_string(),
            stock: format!("{}-stock", sku),
            mpn: format!("{}-mpn", sku),
            gtin: gtin.to_string(),
            price: price.to_string(),
            status: "active".to_string(),
        }
    }

    #[test]
    fn test_build_row_takes_name_and_price_from_main() {
        let main = item("GRIP", "Grip Sock", "€ 12.50", "1");
        let variant = item("GRIP-S", "Grip Sock Small", "€ 99.00", "0042");
        let mut log = TransformLog::new();

        let row = build_row(&main, &variant, &Config::default(), &mut log);

        assert_eq!(row.entry_type, "Item");
        assert_eq!(row.entry_name, "Grip Sock");
        assert_eq!(row.item_group_name, "Grip Sock");
        assert_eq!(row.attribute1_name, "Size");
        assert_eq!(row.attribute1_option, "SM");
        assert_eq!(row.attribute2_name, "Color");
        assert_eq!(row.attribute2_option, "Not Specified");
        assert_eq!(row.quantity, "GRIP-S-stock");
        assert_eq!(row.unit, "Unit");
        assert_eq!(row.min_level, "1");
        assert_eq!(row.price, "12.50");
        assert_eq!(row.notes, "active");
        assert_eq!(row.tags, "Kallithea");
        assert_eq!(row.primary_folder, "Apparel");
        assert_eq!(row.subfolder_level1, "Socks");
        assert_eq!(row.subfolder_level2, "Grip Socks");
        assert_eq!(row.serial_number, "GRIP-S-mpn");
        assert_eq!(row.barcode_data, GtinValue::Number(42));
        assert_eq!(row.barcode_type, "org.iso.Code128");
        assert_eq!(log.warnings().count(), 0);
    }

    #[test]
    fn test_gtin_warning_names_main_item() {
        let main = item("GRIP", "Grip Sock", "1", "1");
        let variant = item("GRIP-S", "Grip Sock Small", "1", "");
        let mut log = TransformLog::new();

        build_row(&main, &variant, &Config::default(), &mut log);

        let warnings: Vec<&str> = log.warnings().collect();
        assert_eq!(warnings, vec!["Grip Sock: missing GTIN"]);
    }

    #[test]
    fn test_build_rows_skips_main_items() {
        let groups = group_by_base_sku(vec![
            item("A", "A", "1", "1"),
            item("A-S", "A Small", "1", "1"),
            item("B", "B", "1", "1"),
            item("A-M", "A Medium", "1", "1"),
        ]);
        let rows = build_rows(&groups, &Config::default(), &mut TransformLog::new());

        let serials: Vec<&str> = rows.iter().map(|r| r.serial_number.as_str()).collect();
        assert_eq!(serials, vec!["A-S-mpn", "A-M-mpn"]);
    }

    #[test]
    fn test_write_csv_header_only() {
        let csv = write_csv(&[]).unwrap();
        assert_eq!(csv, format!("{}\r\n", OUTPUT_COLUMNS.join(",")));
    }

    #[test]
    fn test_write_csv_quotes_when_needed() {
        let main = item("A", "Sock, \"Pro\"", "1", "1");
        let variant = item("A-S", "Sock Small", "1", "ABC");
        let row = build_row(&main, &variant, &Config::default(), &mut TransformLog::new());

        let csv = write_csv(&[row]).unwrap();
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with("Item,\"Sock, \"\"Pro\"\"\",\"Sock, \"\"Pro\"\"\",Size,SM,"));
        assert!(line.ends_with(",A-S-mpn,ABC,org.iso.Code128"));
    }
}
