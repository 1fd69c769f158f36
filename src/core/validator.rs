//! Header/data range compatibility checks
//!
//! The checks are deliberately loose: addresses are never fully parsed, only
//! scanned for column-letter tokens and digit runs.

use crate::address::{column_tokens, row_numbers, strip_sheet};
use serde::Serialize;
use std::collections::HashSet;

pub const FORMAT_ERROR: &str = "Range format is incorrect";
pub const SINGLE_ROW_ERROR: &str = "Column range must be a single row";
pub const BOUNDS_ERROR: &str = "Row range must start and end within the column bounds";

/// Outcome of validating a header range against a data range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }

    fn push(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Check that `column_range` is one row tall and that `row_range` spans the
/// same first and last columns.
///
/// A range with no recognizable column letters short-circuits with a single
/// format error. A column range without any row digits passes the single-row
/// check.
pub fn validate_ranges(column_range: &str, row_range: &str) -> ValidationResult {
    let mut result = ValidationResult::default();

    let columns = strip_sheet(column_range);
    let rows = strip_sheet(row_range);

    let column_letters = column_tokens(columns);
    let row_letters = column_tokens(rows);

    let (Some(col_start), Some(col_end), Some(row_start), Some(row_end)) = (
        column_letters.first(),
        column_letters.last(),
        row_letters.first(),
        row_letters.last(),
    ) else {
        result.push(FORMAT_ERROR);
        return result;
    };

    let distinct_rows: HashSet<&str> = row_numbers(columns).into_iter().collect();
    if !distinct_rows.is_empty() && distinct_rows.len() != 1 {
        result.push(SINGLE_ROW_ERROR);
    }

    if row_start != col_start || row_end != col_end {
        result.push(BOUNDS_ERROR);
    }

    result
}
