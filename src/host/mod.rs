//! Spreadsheet host capability
//!
//! The panel never talks to a spreadsheet application directly. Everything it
//! needs from one goes through [`SpreadsheetHost`]: the address of the current
//! selection, and the values inside an address.

mod workbook;

pub use workbook::WorkbookHost;

use crate::error::RangeResult;
use crate::types::CellValue;
use async_trait::async_trait;

/// Rectangular block of cell values, row-major
pub type CellGrid = Vec<Vec<CellValue>>;

#[async_trait]
pub trait SpreadsheetHost: Send + Sync {
    /// Address of the active selection, sheet-qualified the way the host
    /// reports it (e.g. `Sheet1!A1:D1`)
    async fn selected_address(&self) -> RangeResult<String>;

    /// Values of `address` on `sheet`, or on the active sheet when `sheet`
    /// is `None`. `address` carries no sheet prefix.
    async fn load_values(&self, sheet: Option<&str>, address: &str) -> RangeResult<CellGrid>;
}
