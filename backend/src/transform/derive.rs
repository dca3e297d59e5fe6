//! Field derivers: size codes, prices and barcodes.
//!
//! Every deriver is total. Malformed input produces a fallback value and a
//! warning in the caller's [`TransformLog`], never an error.

use crate::logs::TransformLog;
use crate::models::GtinValue;

/// Size markers searched in product names, first match wins.
///
/// "XSmall" must stay ahead of "Small", which it contains. "X Large" also
/// contains "Large" and sits behind it, so "X Large" names come out as LA.
pub const SIZE_MARKERS: [(&str, &str); 5] = [
    ("XSmall", "XS"),
    ("Small", "SM"),
    ("Medium", "ME"),
    ("Large", "LA"),
    ("X Large", "XL"),
];

/// Size code for names with no recognised marker.
pub const ONE_SIZE: &str = "OS";

/// Price used when the raw value is missing or unusable.
pub const FALLBACK_PRICE: &str = "0.00";

/// Size code from a product name (case-sensitive substring match).
pub fn extract_size(name: &str) -> &'static str {
    SIZE_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map_or(ONE_SIZE, |&(_, code)| code)
}

/// Normalize a price to two decimals.
///
/// Everything but ASCII digits and `.` is stripped first, so currency
/// symbols, spaces and thousands separators disappear.
pub fn process_price(raw: &str, name: &str, log: &mut TransformLog) -> String {
    if raw.trim().is_empty() {
        log.warning(format!("{}: missing price, using {}", name, FALLBACK_PRICE));
        return FALLBACK_PRICE.to_string();
    }

    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    match cleaned.parse::<f64>() {
        Ok(value) => format!("{:.2}", value),
        Err(_) => {
            log.warning(format!(
                "{}: invalid price '{}', using {}",
                name, raw, FALLBACK_PRICE
            ));
            FALLBACK_PRICE.to_string()
        }
    }
}

/// Lenient GTIN check.
///
/// Integers are returned as numbers; blank and non-numeric values come back
/// exactly as given, with a warning.
pub fn validate_gtin(raw: &str, name: &str, log: &mut TransformLog) -> GtinValue {
    if raw.trim().is_empty() {
        log.warning(format!("{}: missing GTIN", name));
        return GtinValue::Raw(raw.to_string());
    }

    match raw.trim().parse::<i128>() {
        Ok(n) => GtinValue::Number(n),
        Err(_) => {
            log.warning(format!(
                "{}: invalid GTIN, expected an integer (got '{}')",
                name, raw
            ));
            GtinValue::Raw(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_size() {
        assert_eq!(extract_size("Grip Sock XSmall"), "XS");
        assert_eq!(extract_size("XSmall Widget"), "XS");
        assert_eq!(extract_size("Grip Sock Small"), "SM");
        assert_eq!(extract_size("Grip Sock Medium"), "ME");
        assert_eq!(extract_size("Grip Sock Large"), "LA");
        assert_eq!(extract_size("Plain Widget"), "OS");
    }

    #[test]
    fn test_extract_size_is_case_sensitive() {
        assert_eq!(extract_size("grip sock small"), "OS");
        assert_eq!(extract_size("MEDIUM"), "OS");
    }

    #[test]
    fn test_extract_size_x_large_hits_large_first() {
        assert_eq!(extract_size("Grip Sock X Large"), "LA");
    }

    #[test]
    fn test_process_price() {
        let mut log = TransformLog::new();
        assert_eq!(process_price("€ 12.50", "X", &mut log), "12.50");
        assert_eq!(process_price("12", "X", &mut log), "12.00");
        assert_eq!(process_price("$1,299.9", "X", &mut log), "1299.90");
        assert_eq!(process_price(" 7.5 EUR ", "X", &mut log), "7.50");
        assert_eq!(log.warnings().count(), 0);
    }

    #[test]
    fn test_process_price_missing() {
        let mut log = TransformLog::new();
        assert_eq!(process_price("", "Sock", &mut log), "0.00");
        assert_eq!(process_price("   ", "Sock", &mut log), "0.00");

        let warnings: Vec<&str> = log.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("missing price"));
        assert!(warnings[0].contains("Sock"));
    }

    #[test]
    fn test_process_price_invalid() {
        let mut log = TransformLog::new();
        assert_eq!(process_price("abc", "X", &mut log), "0.00");
        assert_eq!(process_price("1.2.3", "X", &mut log), "0.00");
        assert_eq!(process_price("€ .", "X", &mut log), "0.00");

        assert_eq!(log.warnings().count(), 3);
        assert!(log.warnings().all(|w| w.contains("invalid price")));
    }

    #[test]
    fn test_validate_gtin_integer() {
        let mut log = TransformLog::new();
        assert_eq!(validate_gtin("0123456", "X", &mut log), GtinValue::Number(123456));
        assert_eq!(validate_gtin("4006381333931", "X", &mut log), GtinValue::Number(4006381333931));
        assert_eq!(validate_gtin(" 42 ", "X", &mut log), GtinValue::Number(42));
        assert_eq!(log.warnings().count(), 0);
    }

    #[test]
    fn test_validate_gtin_missing() {
        let mut log = TransformLog::new();
        assert_eq!(validate_gtin("", "X", &mut log), GtinValue::Raw(String::new()));

        let warnings: Vec<&str> = log.warnings().collect();
        assert_eq!(warnings, vec!["X: missing GTIN"]);
    }

    #[test]
    fn test_validate_gtin_invalid_passes_through() {
        let mut log = TransformLog::new();
        assert_eq!(validate_gtin("ABC123", "X", &mut log), GtinValue::Raw("ABC123".into()));
        assert_eq!(
            validate_gtin("400-638", "X", &mut log),
            GtinValue::Raw("400-638".into())
        );

        assert_eq!(log.warnings().count(), 2);
        assert!(log.warnings().all(|w| w.contains("invalid GTIN, expected an integer")));
        assert_eq!(
            log.warnings().next(),
            Some("X: invalid GTIN, expected an integer (got 'ABC123')")
        );
    }

    #[test]
    fn test_validate_gtin_long_digit_strings() {
        let mut log = TransformLog::new();
        assert_eq!(
            validate_gtin("12345678901234567890123", "X", &mut log),
            GtinValue::Number(12345678901234567890123)
        );
        assert_eq!(validate_gtin("-7", "X", &mut log), GtinValue::Number(-7));
        assert_eq!(log.warnings().count(), 0);
    }
}
