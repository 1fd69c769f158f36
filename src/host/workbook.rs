//! Workbook file host - calamine-backed stand-in for a live spreadsheet

use super::{CellGrid, SpreadsheetHost};
use crate::address::{column_letter, qualify, split_sheet, unquote_sheet_name, AreaRef};
use crate::error::{RangeError, RangeResult};
use crate::types::CellValue;
use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Refuse reads that would materialize more cells than this
const MAX_CELLS: u64 = 5_000_000;

/// An in-memory copy of a workbook with an active sheet and a selection
pub struct WorkbookHost {
    sheets: Vec<(String, Range<Data>)>,
    active: usize,
    selection: Option<String>,
}

impl WorkbookHost {
    /// Read every worksheet of an xlsx/xlsm/xlsb/xls/ods file
    pub fn open<P: AsRef<Path>>(path: P) -> RangeResult<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, range));
        }

        Ok(Self::from_sheets(sheets))
    }

    /// Build a host from already-loaded sheets. The first sheet is active.
    pub fn from_sheets(sheets: Vec<(String, Range<Data>)>) -> Self {
        Self {
            sheets,
            active: 0,
            selection: None,
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn active_sheet(&self) -> Option<&str> {
        self.sheets.get(self.active).map(|(name, _)| name.as_str())
    }

    /// Make `name` the active sheet
    pub fn activate(&mut self, name: &str) -> RangeResult<()> {
        let name = unquote_sheet_name(name);
        self.active = self
            .sheets
            .iter()
            .position(|(n, _)| *n == name)
            .ok_or_else(|| RangeError::SheetNotFound(name.to_string()))?;
        Ok(())
    }

    /// Select `address`, as a user would by dragging over cells.
    /// A sheet-qualified address also activates that sheet.
    pub fn select(&mut self, address: &str) -> RangeResult<()> {
        let (sheet, area) = split_sheet(address);
        if let Some(sheet) = sheet {
            self.activate(sheet)?;
        }
        AreaRef::parse(area)?;
        self.selection = Some(area.trim().replace('$', ""));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Address covering the non-empty cells of a sheet, e.g. `A1:D5`
    pub fn used_range(&self, name: &str) -> Option<String> {
        let range = self.sheet(name).ok()?;
        let (start, end) = (range.start()?, range.end()?);
        Some(format!(
            "{}{}:{}{}",
            column_letter(start.1),
            start.0 + 1,
            column_letter(end.1),
            end.0 + 1
        ))
    }

    fn sheet(&self, name: &str) -> RangeResult<&Range<Data>> {
        let name = unquote_sheet_name(name);
        self.sheets
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, range)| range)
            .ok_or_else(|| RangeError::SheetNotFound(name.to_string()))
    }

    fn resolve(&self, sheet: Option<&str>) -> RangeResult<&Range<Data>> {
        match sheet {
            Some(name) => self.sheet(name),
            None => self
                .sheets
                .get(self.active)
                .map(|(_, range)| range)
                .ok_or_else(|| RangeError::SheetNotFound("<active>".to_string())),
        }
    }

    fn read_area(range: &Range<Data>, address: &str) -> RangeResult<CellGrid> {
        let area = AreaRef::parse(address.trim())?;

        let bounds = match (area, range.start(), range.end()) {
            (AreaRef::Cells { first, last }, _, _) => Some((first, last)),
            (AreaRef::Columns { first, last }, Some(start), Some(end)) => {
                Some(((start.0, first), (end.0, last)))
            }
            (AreaRef::Rows { first, last }, Some(start), Some(end)) => {
                Some(((first, start.1), (last, end.1)))
            }
            // Whole rows/columns of an empty sheet
            _ => None,
        };
        let Some((first, last)) = bounds else {
            return Ok(Vec::new());
        };

        let height = u64::from(last.0 - first.0) + 1;
        let width = u64::from(last.1 - first.1) + 1;
        if height * width > MAX_CELLS {
            return Err(RangeError::Address(format!(
                "{} covers {} cells (limit {})",
                address,
                height * width,
                MAX_CELLS
            )));
        }

        Ok((first.0..=last.0)
            .map(|row| {
                (first.1..=last.1)
                    .map(|col| {
                        range
                            .get_value((row, col))
                            .map(cell_value)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect())
    }
}

#[async_trait]
impl SpreadsheetHost for WorkbookHost {
    async fn selected_address(&self) -> RangeResult<String> {
        let selection = self.selection.as_deref().ok_or(RangeError::NoSelection)?;
        match self.active_sheet() {
            Some(sheet) => Ok(qualify(sheet, selection)),
            None => Ok(selection.to_string()),
        }
    }

    async fn load_values(&self, sheet: Option<&str>, address: &str) -> RangeResult<CellGrid> {
        let range = self.resolve(sheet)?;
        Self::read_area(range, address)
    }
}

/// Map a calamine cell onto the host value model
fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
