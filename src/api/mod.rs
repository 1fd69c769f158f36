//! range-records API Server module
//!
//! Provides the HTTP REST API for taskpane front-ends.
//! Run with `range-records serve` or `range-records-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};
