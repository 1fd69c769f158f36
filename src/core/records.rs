//! Range values → records

use crate::types::{CellValue, Record};

/// Pair every data row with the header labels.
///
/// Header `i` labels value `i` of each row. Rows shorter than the header
/// leave the trailing labels unset; values past the last header are dropped.
/// When two headers share a label, the later column's value wins.
pub fn build_records(headers: &[CellValue], rows: &[Vec<CellValue>]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| (header.to_label(), value.clone()))
                .collect::<Record>()
        })
        .collect()
}
