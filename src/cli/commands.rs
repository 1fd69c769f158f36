use crate::core::validate_ranges;
use crate::error::{RangeError, RangeResult};
use crate::host::WorkbookHost;
use crate::panel::ExtractionPanel;
use crate::types::Record;
use clap::ValueEnum;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Serialization format for extracted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render(self, records: &[Record]) -> RangeResult<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(records)?),
        }
    }
}

/// Execute the validate command
pub fn validate(column_range: String, row_range: String) -> RangeResult<()> {
    println!("{}", "✅ Validating ranges".bold().green());
    println!("   Columns: {}", column_range);
    println!("   Rows:    {}\n", row_range);

    let result = validate_ranges(&column_range, &row_range);
    if result.is_valid() {
        println!("{}", "✅ Ranges are compatible".bold().green());
        return Ok(());
    }

    println!(
        "{}",
        format!("❌ Found {} problem(s)", result.errors.len())
            .bold()
            .red()
    );
    for error in &result.errors {
        println!("   • {}", error.red());
    }

    Err(RangeError::Validation(result.errors.join("; ")))
}

/// Execute the extract command
///
/// Selects each address in the workbook the way a user would, then runs the
/// panel's extraction. Records go to `output`, or to stdout when no output
/// file is given (status lines then go to stderr).
pub async fn extract(
    workbook: PathBuf,
    columns: String,
    rows: String,
    sheet: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> RangeResult<()> {
    eprintln!("{}", "📊 Extracting records".bold().green());
    eprintln!("   Workbook: {}", workbook.display());

    let mut host = WorkbookHost::open(&workbook)?;
    if let Some(ref name) = sheet {
        host.activate(name)?;
    }
    if let Some(active) = host.active_sheet() {
        eprintln!("   Sheet:    {}", active.bright_blue());
    }

    let mut panel = ExtractionPanel::new(host);

    // An address the host cannot select is typed in as-is, so the
    // validator reports it
    match panel.host_mut().select(&columns) {
        Ok(()) => {
            panel.select_columns().await;
        }
        Err(RangeError::Address(_)) => panel.set_column_range(columns.as_str()),
        Err(e) => return Err(e),
    }
    match panel.host_mut().select(&rows) {
        Ok(()) => {
            panel.select_rows().await;
        }
        Err(RangeError::Address(_)) => panel.set_row_range(rows.as_str()),
        Err(e) => return Err(e),
    }

    eprintln!("   Columns:  {}", panel.column_range());
    eprintln!("   Rows:     {}\n", panel.row_range());

    let Some(records) = panel.extract().await else {
        eprintln!("{}", "❌ Extraction failed".bold().red());
        for error in panel.errors() {
            eprintln!("   • {}", error.red());
        }
        return Err(RangeError::Extraction(panel.errors().join("; ")));
    };

    let rendered = format.render(&records)?;
    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            eprintln!(
                "{}",
                format!("✅ Wrote {} record(s)", records.len()).bold().green()
            );
            eprintln!("   Output: {}", path.display());
        }
        None => {
            println!("{}", rendered);
            eprintln!(
                "{}",
                format!("✅ Extracted {} record(s)", records.len())
                    .bold()
                    .green()
            );
        }
    }

    Ok(())
}

/// Execute the sheets command
pub fn sheets(workbook: PathBuf) -> RangeResult<()> {
    println!("{}", "📖 Workbook sheets".bold().green());
    println!("   File: {}\n", workbook.display());

    let host = WorkbookHost::open(&workbook)?;
    let names = host.sheet_names();
    if names.is_empty() {
        println!("{}", "⚠️  Workbook has no worksheets".yellow());
        return Ok(());
    }

    for name in names {
        let used = host
            .used_range(name)
            .unwrap_or_else(|| "(empty)".to_string());
        println!("   {}  {}", name.bright_blue().bold(), used);
    }

    Ok(())
}
