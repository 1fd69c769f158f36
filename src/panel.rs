//! Extraction panel state and workflow
//!
//! Holds the two addresses the user has picked (header row and data rows),
//! the current error list, and drives select → validate → read → build →
//! dispatch against a [`SpreadsheetHost`].

use crate::address::{split_sheet, strip_sheet, unquote_sheet_name};
use crate::core::{build_records, validate_ranges};
use crate::dispatch::Dispatcher;
use crate::error::RangeResult;
use crate::host::SpreadsheetHost;
use crate::types::Record;
use tracing::{debug, error};

/// Message shown when the host fails during extraction
pub const EXTRACTION_ERROR: &str = "Error extracting data";

pub struct ExtractionPanel<H: SpreadsheetHost> {
    host: H,
    dispatcher: Dispatcher,
    column_range: String,
    row_range: String,
    errors: Vec<String>,
}

impl<H: SpreadsheetHost> ExtractionPanel<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            dispatcher: Dispatcher::new(),
            column_range: String::new(),
            row_range: String::new(),
            errors: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Header range address
    pub fn column_range(&self) -> &str {
        &self.column_range
    }

    /// Data range address
    pub fn row_range(&self) -> &str {
        &self.row_range
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn set_column_range(&mut self, address: impl Into<String>) {
        self.column_range = address.into();
    }

    pub fn set_row_range(&mut self, address: impl Into<String>) {
        self.row_range = address.into();
    }

    /// Extraction is offered once both addresses are set
    pub fn can_extract(&self) -> bool {
        !self.column_range.is_empty() && !self.row_range.is_empty()
    }

    /// Capture the host's selection as the header range.
    /// Returns false (and keeps the old address) if the host call fails.
    pub async fn select_columns(&mut self) -> bool {
        match self.host.selected_address().await {
            Ok(address) => {
                debug!(%address, "column range selected");
                self.column_range = address;
                true
            }
            Err(e) => {
                error!(error = %e, "failed to read selection for column range");
                false
            }
        }
    }

    /// Capture the host's selection as the data range.
    /// Returns false (and keeps the old address) if the host call fails.
    pub async fn select_rows(&mut self) -> bool {
        match self.host.selected_address().await {
            Ok(address) => {
                debug!(%address, "row range selected");
                self.row_range = address;
                true
            }
            Err(e) => {
                error!(error = %e, "failed to read selection for row range");
                false
            }
        }
    }

    /// Validate, read both ranges, build records and dispatch them.
    ///
    /// Returns the dispatched records, or `None` when validation or a host
    /// read failed; the reasons are left in [`errors`](Self::errors).
    pub async fn extract(&mut self) -> Option<Vec<Record>> {
        self.errors.clear();

        let validation = validate_ranges(&self.column_range, &self.row_range);
        if !validation.is_valid() {
            self.errors = validation.errors;
            return None;
        }

        match self.read_records().await {
            Ok(records) => {
                self.dispatcher.send(&records).await;
                Some(records)
            }
            Err(e) => {
                error!(error = %e, "Error extracting data");
                self.errors.push(EXTRACTION_ERROR.to_string());
                None
            }
        }
    }

    async fn read_records(&self) -> RangeResult<Vec<Record>> {
        // Both ranges are read from the header range's sheet
        let (sheet, header_address) = split_sheet(&self.column_range);
        let sheet = sheet.map(unquote_sheet_name);
        let data_address = strip_sheet(&self.row_range);

        let header_values = self
            .host
            .load_values(sheet.as_deref(), header_address)
            .await?;
        let rows = self.host.load_values(sheet.as_deref(), data_address).await?;

        let headers = header_values.into_iter().next().unwrap_or_default();
        Ok(build_records(&headers, &rows))
    }
}
