//! range-records API Server binary
//!
//! HTTP REST API for taskpane front-ends.
//! Provides validate, records and extract endpoints.

use clap::Parser;
use range_records::api::{run_api_server, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "range-records-server")]
#[command(version)]
#[command(about = "range-records API Server - validate ranges and build records over HTTP")]
#[command(long_about = r#"
range-records API Server

Provides RESTful endpoints for the extraction panel:
  - POST /api/v1/validate  - Check a header range against a data range
  - POST /api/v1/records   - Build records from header values and data rows
  - POST /api/v1/extract   - Validate and extract records from a workbook file

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for taskpane origins
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging (RUST_LOG)

Example usage:
  range-records-server                           # Start on localhost:8080
  range-records-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/validate \
    -H "Content-Type: application/json" \
    -d '{"column_range": "Sheet1!A1:D1", "row_range": "Sheet1!A2:D5"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "RANGE_RECORDS_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "RANGE_RECORDS_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
