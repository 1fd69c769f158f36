//! Range validation tests

use pretty_assertions::assert_eq;
use range_records::core::validator::{BOUNDS_ERROR, FORMAT_ERROR, SINGLE_ROW_ERROR};
use range_records::core::validate_ranges;

// ═══════════════════════════════════════════════════════════════════════════
// COMPATIBLE RANGES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sheet_qualified_pair_is_valid() {
    let result = validate_ranges("Sheet1!A1:D1", "Sheet1!A2:D5");
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
}

#[test]
fn test_quoted_sheet_prefix_is_ignored() {
    let result = validate_ranges("'Q1 Data'!B3:F3", "'Q1 Data'!B4:F40");
    assert!(result.is_valid());
}

#[test]
fn test_mismatched_sheets_are_not_checked() {
    // Only the address parts are compared
    let result = validate_ranges("Sheet1!A1:C1", "Sheet2!A2:C9");
    assert!(result.is_valid());
}

#[test]
fn test_matching_bounds_never_raise_bounds_error() {
    let headers = ["A1:D1", "B7:B7", "AA3:AC3", "Sheet!C12:Z12"];
    let data = ["A2:D9", "B8:B100", "AA4:AC5", "C13:Z13"];

    for (h, d) in headers.iter().zip(data.iter()) {
        let result = validate_ranges(h, d);
        assert!(
            !result.contains(BOUNDS_ERROR),
            "{} vs {} raised a bounds error",
            h,
            d
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REJECTED RANGES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_two_row_header() {
    let result = validate_ranges("A1:D2", "A2:D5");
    assert!(result.contains(SINGLE_ROW_ERROR));
    assert!(!result.is_valid());
}

#[test]
fn test_data_range_outside_header_columns() {
    let result = validate_ranges("A1:D1", "B2:E5");
    assert!(result.contains(BOUNDS_ERROR));
}

#[test]
fn test_data_range_narrower_than_header() {
    let result = validate_ranges("A1:D1", "A2:C5");
    assert_eq!(result.errors, vec![BOUNDS_ERROR.to_string()]);
}

#[test]
fn test_empty_header_is_format_error_only() {
    let result = validate_ranges("", "A1:A1");
    assert_eq!(result.errors, vec![FORMAT_ERROR.to_string()]);
}

#[test]
fn test_empty_data_range_is_format_error_only() {
    let result = validate_ranges("A1:D3", "");
    assert_eq!(result.errors, vec![FORMAT_ERROR.to_string()]);
}

#[test]
fn test_sheet_name_alone_is_format_error() {
    let result = validate_ranges("Sheet1!", "Sheet1!A2:B3");
    assert_eq!(result.errors, vec![FORMAT_ERROR.to_string()]);
}

#[test]
fn test_errors_are_ordered() {
    let result = validate_ranges("A1:D2", "B2:E5");
    assert_eq!(
        result.errors,
        vec![SINGLE_ROW_ERROR.to_string(), BOUNDS_ERROR.to_string()]
    );
}

#[test]
fn test_header_rows_compare_as_written() {
    // "1" and "01" are different row numbers as far as the check goes
    let result = validate_ranges("A1:B01", "A2:B3");
    assert!(result.contains(SINGLE_ROW_ERROR));
}
