//! Hand-off point for extracted records
//!
//! No processing server exists yet, so dispatch only logs what would be sent.

use crate::types::Record;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Log the records that would be posted for processing
    pub async fn send(&self, records: &[Record]) {
        info!(count = records.len(), "records ready for processing");
        match serde_json::to_string(records) {
            Ok(payload) => debug!(%payload, "dispatch payload"),
            Err(e) => warn!(error = %e, "could not encode dispatch payload"),
        }
    }
}
