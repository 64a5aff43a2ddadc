// Disk partition and I/O models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionStat {
    pub mount: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub total_space: u64,
    pub used_space: u64,
    pub available_space: u64,
    pub usage_percent: f64,
}

/// Host-wide disk I/O: cumulative counters since boot plus derived throughput.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskIoStats {
    pub read_bytes: u64,
    pub write_bytes: u64,
    #[serde(default)]
    pub read_bytes_per_sec: f64,
    #[serde(default)]
    pub write_bytes_per_sec: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStats {
    pub partitions: Vec<PartitionStat>,
    pub io: DiskIoStats,
}
