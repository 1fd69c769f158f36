//! A1-style range addresses
//!
//! Addresses look like `[SheetName!]A1:D5`. The validator only needs the loose
//! token extraction helpers (`column_tokens`, `row_numbers`); the workbook host
//! needs a real parse into zero-based cell coordinates (`AreaRef::parse`).

use crate::error::{RangeError, RangeResult};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn letter_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("letter run pattern"))
}

fn digit_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run pattern"))
}

//==============================================================================
// Sheet qualification
//==============================================================================

/// Split `Sheet!A1:B2` into its sheet prefix and address part.
///
/// The address part is the text between the first and second `!`, so
/// `a!b!c` yields `(Some("a"), "b")`. Unqualified input comes back whole.
pub fn split_sheet(address: &str) -> (Option<&str>, &str) {
    let mut parts = address.split('!');
    match (parts.next(), parts.next()) {
        (Some(sheet), Some(area)) => (Some(sheet), area),
        _ => (None, address),
    }
}

/// The address with any sheet prefix removed
pub fn strip_sheet(address: &str) -> &str {
    split_sheet(address).1
}

/// Remove the quoting Excel puts around sheet names: `'Q1 ''24'` → `Q1 '24`
pub fn unquote_sheet_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        Cow::Owned(trimmed[1..trimmed.len() - 1].replace("''", "'"))
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Qualify an address with a sheet name, quoting the name when needed
pub fn qualify(sheet: &str, address: &str) -> String {
    let plain = !sheet.is_empty()
        && !sheet.starts_with(|c: char| c.is_ascii_digit())
        && sheet.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    if plain {
        format!("{}!{}", sheet, address)
    } else {
        format!("'{}'!{}", sheet.replace('\'', "''"), address)
    }
}

//==============================================================================
// Loose token extraction
//==============================================================================

/// Column-letter tokens of an address, in order of appearance.
///
/// A token is a run of ASCII letters followed directly by a digit, or
/// followed by nothing but trailing whitespace. `A1:D5` gives `["A", "D"]`,
/// `B:E` gives `["E"]`, `Sheet1` gives `[]`.
pub fn column_tokens(address: &str) -> Vec<&str> {
    letter_run()
        .find_iter(address)
        .filter(|m| {
            let rest = &address[m.end()..];
            rest.starts_with(|c: char| c.is_ascii_digit()) || rest.trim().is_empty()
        })
        .map(|m| m.as_str())
        .collect()
}

/// Every run of digits in an address, as written
pub fn row_numbers(address: &str) -> Vec<&str> {
    digit_run().find_iter(address).map(|m| m.as_str()).collect()
}

//==============================================================================
// Coordinates
//==============================================================================

/// Convert column letters to a zero-based index (A→0, Z→25, AA→26)
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Convert a zero-based column index to letters (0→A, 25→Z, 26→AA)
pub fn column_letter(index: u32) -> String {
    let mut result = String::new();
    let mut num = index;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// A parsed area, zero-based and normalized so first <= last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaRef {
    /// `A1` or `A1:D5`
    Cells {
        first: (u32, u32),
        last: (u32, u32),
    },
    /// `A:D`, whole columns
    Columns { first: u32, last: u32 },
    /// `1:3`, whole rows
    Rows { first: u32, last: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Cell(u32, u32),
    Column(u32),
    Row(u32),
}

fn parse_part(text: &str) -> Option<Part> {
    let text = text.trim().replace('$', "");
    let split = text
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let row = if digits.is_empty() {
        None
    } else {
        let n: u32 = digits.parse().ok()?;
        Some(n.checked_sub(1)?)
    };
    let col = if letters.is_empty() {
        None
    } else {
        Some(column_index(letters)?)
    };

    match (row, col) {
        (Some(r), Some(c)) => Some(Part::Cell(r, c)),
        (None, Some(c)) => Some(Part::Column(c)),
        (Some(r), None) => Some(Part::Row(r)),
        (None, None) => None,
    }
}

impl AreaRef {
    /// Parse an unqualified address. Any sheet prefix must be removed first.
    pub fn parse(address: &str) -> RangeResult<Self> {
        let invalid = || RangeError::Address(address.to_string());
        let mut parts = address.split(':');
        let first = parts.next().and_then(parse_part).ok_or_else(invalid)?;
        let second = match parts.next() {
            Some(text) => Some(parse_part(text).ok_or_else(invalid)?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        match (first, second) {
            (Part::Cell(r, c), None) => Ok(AreaRef::Cells {
                first: (r, c),
                last: (r, c),
            }),
            (Part::Cell(r1, c1), Some(Part::Cell(r2, c2))) => Ok(AreaRef::Cells {
                first: (r1.min(r2), c1.min(c2)),
                last: (r1.max(r2), c1.max(c2)),
            }),
            (Part::Column(a), Some(Part::Column(b))) => Ok(AreaRef::Columns {
                first: a.min(b),
                last: a.max(b),
            }),
            (Part::Row(a), Some(Part::Row(b))) => Ok(AreaRef::Rows {
                first: a.min(b),
                last: a.max(b),
            }),
            _ => Err(invalid()),
        }
    }
}
