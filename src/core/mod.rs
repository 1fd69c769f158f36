//! Range validation and range-to-record conversion

pub mod records;
pub mod validator;

pub use records::build_records;
pub use validator::{validate_ranges, ValidationResult};
