//! Bulk-operation progress: the status document and a fixed-interval poller
//!
//! The poller does not retry. A failed fetch ends tracking and the error is
//! handed back to the caller.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Delay between two status fetches
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Lifecycle state reported for a bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationState {
    Pending,
    Processing,
    Completed,
    Failed,
    /// A state this client does not know about
    Other(String),
}

impl OperationState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(state) => state,
        }
    }
}

impl From<String> for OperationState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(state),
        }
    }
}

impl From<OperationState> for String {
    fn from(state: OperationState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status document for one bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationStatus {
    pub status: OperationState,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub processed_records: u64,
    #[serde(default)]
    pub failed_records: u64,
}

impl BulkOperationStatus {
    /// Processed share of all records, rounded to a whole percent
    pub fn percentage(&self) -> u8 {
        if self.total_records == 0 {
            return 0;
        }
        let ratio = self.processed_records as f64 / self.total_records as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Whether the operation may still change, i.e. polling should go on
    pub fn is_active(&self) -> bool {
        matches!(self.status, OperationState::Pending | OperationState::Processing)
    }

    pub fn has_failures(&self) -> bool {
        self.failed_records > 0
    }
}

/// Where status documents come from
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn fetch(&mut self, operation_id: &str) -> Result<BulkOperationStatus>;
}

/// Poll `source` until the operation settles.
///
/// `on_update` sees every fetched status, including the final one, which is
/// also returned.
pub async fn track<S, F>(
    source: &mut S,
    operation_id: &str,
    interval: Duration,
    mut on_update: F,
) -> Result<BulkOperationStatus>
where
    S: StatusSource,
    F: FnMut(&BulkOperationStatus),
{
    let mut polls: u32 = 0;
    loop {
        let status = match source.fetch(operation_id).await {
            Ok(status) => status,
            Err(e) => {
                error!(operation_id, error = %e, "Error checking progress");
                return Err(e);
            }
        };
        polls += 1;
        debug!(
            operation_id,
            polls,
            state = %status.status,
            percentage = status.percentage(),
            "Fetched bulk operation status"
        );
        on_update(&status);

        if !status.is_active() {
            info!(operation_id, polls, state = %status.status, "Bulk operation settled");
            return Ok(status);
        }

        tokio::time::sleep(interval).await;
    }
}
