use clap::{Parser, Subcommand};
use range_records::api::{run_api_server, ApiConfig};
use range_records::cli::{self, OutputFormat};
use range_records::error::{RangeError, RangeResult};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "range-records")]
#[command(about = "Turn a header range and a data range of a workbook into records.")]
#[command(long_about = "range-records - spreadsheet ranges to key-value records

Pick a one-row header range and a data range with the same first and last
columns. Every data row becomes one record keyed by the header labels.

COMMANDS:
  validate  - Check a header range against a data range
  extract   - Read both ranges from a workbook and write records
  sheets    - List worksheets and their used ranges
  serve     - Run the HTTP API

EXAMPLES:
  range-records validate 'Sheet1!A1:D1' 'Sheet1!A2:D5'
  range-records extract book.xlsx --columns A1:D1 --rows A2:D5
  range-records extract book.xlsx -c 'Q1!B3:F3' -r 'Q1!B4:F40' --format yaml -o q1.yaml

LOGGING:
  Set RUST_LOG (e.g. RUST_LOG=range_records=debug) to see host calls and
  the dispatch payload on stderr.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Check a header range against a data range.

RULES:
  - Both addresses must contain column letters (A1-style, e.g. A1:D1)
  - The header range must be a single row
  - The data range must start and end in the header's first and last columns

Sheet prefixes (Sheet1!) are ignored. Exits non-zero when a rule fails.")]
    /// Check a header range against a data range
    Validate {
        /// Header range address (e.g. Sheet1!A1:D1)
        columns: String,

        /// Data range address (e.g. Sheet1!A2:D5)
        rows: String,
    },

    #[command(long_about = "Read a header range and a data range from a workbook and write records.

Both addresses are selected in the workbook in turn, validated, then read.
Both ranges are read from the header range's sheet; an unqualified header
range reads from the active sheet (--sheet, or the first sheet). An address
that is not an A1 area is passed to validation unchanged, which reports it.

Supports .xlsx, .xlsm, .xlsb, .xls and .ods files.")]
    /// Extract records from a workbook
    Extract {
        /// Path to the workbook file
        workbook: PathBuf,

        /// Header range address
        #[arg(short, long)]
        columns: String,

        /// Data range address
        #[arg(short, long)]
        rows: String,

        /// Active sheet for unqualified addresses
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List worksheets and their used ranges
    Sheets {
        /// Path to the workbook file
        workbook: PathBuf,
    },

    /// Run the HTTP API server
    Serve {
        /// Host address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "RANGE_RECORDS_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "RANGE_RECORDS_PORT")]
        port: u16,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "range_records=warn".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> RangeResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { columns, rows } => {
            init_logging();
            cli::validate(columns, rows)
        }

        Commands::Extract {
            workbook,
            columns,
            rows,
            sheet,
            format,
            output,
        } => {
            init_logging();
            cli::extract(workbook, columns, rows, sheet, format, output).await
        }

        Commands::Sheets { workbook } => {
            init_logging();
            cli::sheets(workbook)
        }

        // The server installs its own subscriber
        Commands::Serve { host, port } => run_api_server(ApiConfig { host, port })
            .await
            .map_err(|e| RangeError::Server(e.to_string())),
    }
}
