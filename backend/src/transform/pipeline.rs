//! High-level pipeline API: product export in, inventory CSV out.
//!
//! Parsing, grouping, field derivation and emission in one call. The log
//! is created inside the call and returned with the output, so calls are
//! independent of each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use skuload::{transform, Config};
//!
//! let input = std::fs::read_to_string("products.csv")?;
//! let output = transform(&input, &Config::default())?;
//!
//! for warning in output.warnings() {
//!     eprintln!("warning: {}", warning);
//! }
//! std::fs::write("transformed_data.csv", &output.csv)?;
//! ```

use serde::Serialize;
use std::path::Path;

use super::emitter::emit;
use super::grouper::group_by_base_sku;
use crate::config::Config;
use crate::error::{CsvError, TransformResult};
use crate::logs::{warning_messages, LogEntry, TransformLog};
use crate::parser::{decode_bytes_auto, delimiter_name, parse};

/// Metadata about the input and what became of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    /// Set when the input was decoded from bytes.
    pub encoding: Option<String>,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub group_count: usize,
    pub output_rows: usize,
}

/// Successful transformation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    /// Output CSV, header included.
    pub csv: String,
    /// Every log entry raised during the call, in order.
    pub log: Vec<LogEntry>,
    pub info: CsvInfo,
}

impl TransformOutput {
    /// Messages of the non-fatal warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        warning_messages(&self.log)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Transform product-export text into the inventory format.
///
/// This is the main entry point. It:
/// 1. Strips a BOM and detects the delimiter
/// 2. Parses rows and checks required columns
/// 3. Groups rows by base SKU
/// 4. Builds one item per variant, deriving size, price and barcode
/// 5. Writes the result as comma-separated CSV
///
/// Any error aborts the whole call; no partial output is produced.
pub fn transform(input: &str, config: &Config) -> TransformResult<TransformOutput> {
    let mut log = TransformLog::new();
    let (csv, info) = run(input, config, &mut log)?;
    Ok(TransformOutput {
        csv,
        log: log.into_entries(),
        info,
    })
}

/// Same as [`transform`] but decodes raw bytes first.
pub fn transform_bytes(bytes: &[u8], config: &Config) -> TransformResult<TransformOutput> {
    let (text, encoding) = decode_bytes_auto(bytes);

    let mut log = TransformLog::new();
    log.info(format!("Detected encoding: {}", encoding));
    let (csv, mut info) = run(&text, config, &mut log)?;
    info.encoding = Some(encoding);

    Ok(TransformOutput {
        csv,
        log: log.into_entries(),
        info,
    })
}

/// Same as [`transform_bytes`] but reads the input from a file.
pub fn transform_file(path: &Path, config: &Config) -> TransformResult<TransformOutput> {
    let bytes = std::fs::read(path).map_err(CsvError::from)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    transform_bytes(&bytes, config)
}

fn run(input: &str, config: &Config, log: &mut TransformLog) -> TransformResult<(String, CsvInfo)> {
    let parsed = parse(input, log)?;
    let row_count = parsed.rows.len();

    let groups = group_by_base_sku(parsed.rows);
    log.info(format!("Grouped {} rows into {} item groups", row_count, groups.len()));

    let (csv, output_rows) = emit(&groups, config, log)?;
    log.success(format!("Generated {} inventory items", output_rows));
    tracing::debug!(
        delimiter = %delimiter_name(parsed.delimiter),
        rows = row_count,
        groups = groups.len(),
        items = output_rows,
        "transformation finished"
    );

    Ok((
        csv,
        CsvInfo {
            encoding: None,
            delimiter: parsed.delimiter,
            headers: parsed.headers,
            row_count,
            group_count: groups.len(),
            output_rows,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    const INPUT: &str = "\
Product SKU,Product Name,Stock,MPN,GTIN,Price,Status
GRIP,Grip Sock,10,M0,,€ 12.50,active
GRIP-S,Grip Sock Small,3,M1,0123456,,active
GRIP-M,Grip Sock Medium,4,M2,ABC123,,draft
TEE,Tee,1,T0,1,5,active
";

    #[test]
    fn test_transform_counts() {
        let output = transform(INPUT, &Config::default()).unwrap();

        assert_eq!(output.info.row_count, 4);
        assert_eq!(output.info.group_count, 2);
        assert_eq!(output.info.output_rows, 2);
        assert_eq!(output.info.delimiter, ',');
        assert_eq!(output.info.encoding, None);
        assert_eq!(output.csv.lines().count(), 3);
    }

    #[test]
    fn test_transform_rows() {
        let output = transform(INPUT, &Config::default()).unwrap();
        let lines: Vec<&str> = output.csv.lines().collect();

        assert_eq!(
            lines[1],
            "Item,Grip Sock,Grip Sock,Size,SM,Color,Not Specified,3,Unit,1,12.50,active,\
             Kallithea,Apparel,Socks,Grip Socks,M1,123456,org.iso.Code128"
        );
        assert_eq!(
            lines[2],
            "Item,Grip Sock,Grip Sock,Size,ME,Color,Not Specified,4,Unit,1,12.50,draft,\
             Kallithea,Apparel,Socks,Grip Socks,M2,ABC123,org.iso.Code128"
        );
    }

    #[test]
    fn test_transform_warnings() {
        let output = transform(INPUT, &Config::default()).unwrap();
        let warnings: Vec<&str> = output.warnings().collect();

        // Main item's empty GTIN is never read; the variant prices are ignored.
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("invalid GTIN"));
        assert!(warnings[0].starts_with("Grip Sock:"));
        assert!(output.has_warnings());
    }

    #[test]
    fn test_transform_uses_config() {
        let config = Config {
            min_level: "7".into(),
            tags: "Winter".into(),
            primary_folder: "Shop".into(),
            subfolder_level1: "Feet".into(),
            subfolder_level2: "Warm".into(),
        };
        let output = transform(INPUT, &config).unwrap();
        let line = output.csv.lines().nth(1).unwrap();
        assert!(line.contains(",Unit,7,12.50,active,Winter,Shop,Feet,Warm,M1,"));
    }

    #[test]
    fn test_transform_missing_gtin_column() {
        let input = "Product SKU,Product Name,Stock,MPN,Price,Status\nA,S,1,M,1,on";
        match transform(input, &Config::default()) {
            Err(TransformError::Csv(CsvError::MissingColumns(cols))) => assert_eq!(cols, vec!["GTIN"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_transform_bytes_records_encoding() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(INPUT.as_bytes());
        let output = transform_bytes(&bytes, &Config::default()).unwrap();
        assert_eq!(output.info.encoding.as_deref(), Some("utf-8"));
        assert!(output.log[0].message.starts_with("Detected encoding"));
        assert_eq!(output.info.output_rows, 2);
    }

    #[test]
    fn test_output_serializes_for_reports() {
        let output = transform(INPUT, &Config::default()).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["info"]["outputRows"], 2);
        assert_eq!(json["info"]["delimiter"], ",");
        assert!(json["log"].as_array().unwrap().iter().any(|e| e["level"] == "warning"));
    }
}
