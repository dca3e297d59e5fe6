//! CSV parser with encoding and delimiter auto-detection.
//!
//! Turns raw product-export text into validated [`InputRow`]s. Decoding of
//! raw bytes lives here too so callers holding a file or an upload can go
//! straight from bytes to rows.

use csv::{ReaderBuilder, StringRecord};

use crate::error::{CsvError, CsvResult};
use crate::logs::TransformLog;
use crate::models::InputRow;
use crate::validation::validate_columns;

/// Number of characters inspected when sniffing the delimiter.
pub const SAMPLE_CHARS: usize = 1024;

/// Delimiters we try, in order of preference when equally consistent.
pub const DELIMITER_CANDIDATES: [char; 4] = [',', '\t', ';', '|'];

/// Share of sample data records that must fit under the header.
const CONSISTENCY_THRESHOLD: f64 = 0.9;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parsed input with the metadata gathered along the way.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub rows: Vec<InputRow>,
    pub delimiter: char,
    pub headers: Vec<String>,
}

// =============================================================================
// Decoding
// =============================================================================

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.starts_with(UTF8_BOM) {
        return "utf-8".to_string();
    }
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// Never fails: unknown labels and invalid UTF-8 fall back to a lossy UTF-8
/// decode.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // WHATWG maps latin-1 labels onto windows-1252, a superset.
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Detect the encoding and decode. Returns the text and the encoding used.
pub fn decode_bytes_auto(bytes: &[u8]) -> (String, String) {
    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding);
    (text, encoding)
}

/// Drop a leading byte-order mark left over from decoding.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

// =============================================================================
// Delimiter Detection
// =============================================================================

/// Format delimiter for display
pub fn delimiter_name(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

/// First [`SAMPLE_CHARS`] characters, and whether anything was cut off.
fn take_sample(content: &str) -> (&str, bool) {
    match content.char_indices().nth(SAMPLE_CHARS) {
        Some((end, _)) => (&content[..end], true),
        None => (content, false),
    }
}

/// Field count of each record in the sample, read with the same quoting
/// rules as the full parse.
///
/// A record cut off by truncation is dropped unless it is the only one.
/// Blank records are skipped.
fn sample_field_counts(sample: &str, truncated: bool, delimiter: char) -> Vec<usize> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let mut counts: Vec<usize> = reader
        .records()
        .map_while(Result::ok)
        .filter(|r| !(r.len() == 1 && r[0].trim().is_empty()))
        .map(|r| r.len())
        .collect();

    if truncated && !sample.ends_with('\n') && counts.len() > 1 {
        counts.pop();
    }
    counts
}

/// Share of data records that fit under the header: split at least once
/// and no wider than the header. Short rows are fine, the parser pads them.
fn consistency(header_width: usize, data: &[usize]) -> f64 {
    if data.is_empty() {
        return 1.0;
    }
    let fitting = data.iter().filter(|&&n| (2..=header_width).contains(&n)).count();
    fitting as f64 / data.len() as f64
}

/// Detect the delimiter from a sample of the content.
///
/// The sample is read once per candidate. A candidate qualifies when it
/// splits the header and at least 90% of the data records fit under it. The
/// most consistent candidate wins, then the one giving the widest header,
/// then [`DELIMITER_CANDIDATES`] order.
pub fn detect_delimiter(content: &str) -> CsvResult<char> {
    let (sample, truncated) = take_sample(content);

    // (delimiter, consistency, header width)
    let mut best: Option<(char, f64, usize)> = None;
    for &delimiter in &DELIMITER_CANDIDATES {
        let counts = sample_field_counts(sample, truncated, delimiter);
        let Some((&header_width, data)) = counts.split_first() else {
            continue;
        };
        if header_width < 2 {
            continue;
        }
        let score = consistency(header_width, data);
        if score < CONSISTENCY_THRESHOLD {
            continue;
        }
        let better = best.map_or(true, |(_, s, w)| score > s || (score == s && header_width > w));
        if better {
            best = Some((delimiter, score, header_width));
        }
    }

    best.map(|(d, _, _)| d).ok_or_else(|| CsvError::UndetectedDelimiter {
        tried: DELIMITER_CANDIDATES
            .iter()
            .map(|&d| format!("'{}'", delimiter_name(d)))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse product-export text into validated rows.
///
/// Fails when no delimiter can be detected, when there are no data rows,
/// or when required columns are missing (all of them are reported).
///
/// # Example
/// ```ignore
/// use skuload::{parse, TransformLog};
///
/// let mut log = TransformLog::new();
/// let csv = "Product SKU;Product Name;Stock;MPN;GTIN;Price;Status\nA;Sock;3;M1;123;€ 9,00;active";
/// let parsed = parse(csv, &mut log).unwrap();
///
/// assert_eq!(parsed.delimiter, ';');
/// assert_eq!(parsed.rows[0].sku, "A");
/// ```
pub fn parse(content: &str, log: &mut TransformLog) -> CsvResult<ParseResult> {
    let content = strip_bom(content);

    let delimiter = detect_delimiter(content)?;
    log.info(format!("Detected delimiter: '{}'", delimiter_name(delimiter)));

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader.records().collect::<Result<Vec<StringRecord>, _>>()?;

    if records.is_empty() {
        return Err(CsvError::EmptyInput);
    }

    log.info(format!("Input CSV columns: {}", headers.join(", ")));
    let columns = validate_columns(&headers)?;

    let rows: Vec<InputRow> = records
        .iter()
        .map(|record| {
            let line = record.position().map_or(0, |p| p.line());
            columns.row(record, line)
        })
        .collect();
    log.success(format!("Read {} rows", rows.len()));

    Ok(ParseResult {
        rows,
        delimiter,
        headers,
    })
}
