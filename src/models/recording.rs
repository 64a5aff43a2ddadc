// Recording session wire model

use serde::{Deserialize, Serialize};

/// Read-only session status. `sample_count` may trail the loop by one tick;
/// an eventually-consistent count is fine for callers polling this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingStatus {
    pub active: bool,
    pub sample_count: usize,
    pub started_at: Option<String>,
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub duration_limit_seconds: u64,
}
