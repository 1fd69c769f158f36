//! range-records - spreadsheet header/data ranges to key-value records
//!
//! Pick a one-row header range and a data range in a workbook, check that
//! they line up, and turn every data row into a record keyed by the header
//! labels.
//!
//! # Example
//!
//! ```
//! use range_records::core::{build_records, validate_ranges};
//! use range_records::types::CellValue;
//!
//! let check = validate_ranges("Sheet1!A1:B1", "Sheet1!A2:B3");
//! assert!(check.is_valid());
//!
//! let headers = vec![CellValue::from("Name"), CellValue::from("Age")];
//! let rows = vec![vec![CellValue::from("Alice"), CellValue::from(30)]];
//! let records = build_records(&headers, &rows);
//! assert_eq!(records[0].get("Age"), Some(&CellValue::Number(30.0)));
//! ```

pub mod address;
pub mod api;
pub mod cli;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod panel;
pub mod types;

// Re-export commonly used types
pub use error::{RangeError, RangeResult};
pub use host::{SpreadsheetHost, WorkbookHost};
pub use panel::ExtractionPanel;
pub use types::{CellValue, Record};
