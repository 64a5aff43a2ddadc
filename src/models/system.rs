// CPU, memory, system identity and snapshot models

use serde::{Deserialize, Serialize};

use super::{DiskStats, GpuStats, NetworkStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStats {
    pub usage_percent: f64,
    pub per_core: Vec<f64>,
    pub frequency_mhz: u64,
    pub frequency_max_mhz: u64,
    pub physical_cores: u32,
    pub logical_cores: u32,
    /// Package temperature in Celsius; `None` when no sensor reports one.
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub usage_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

/// Static system identity; fetched once at startup and exposed via GET /api/info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub os_family: String,
    pub os_manufacturer: String,
    pub os_version: String,
    pub hostname: String,
    pub processor_name: String,
}

/// Per-sample system metrics; identity fields repeated so a snapshot stands alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub os_family: String,
    pub os_version: String,
    pub hostname: String,
    pub uptime_secs: u64,
}

/// One point-in-time reading of all monitored resources. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    pub timestamp: u64,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub disk: DiskStats,
    pub network: NetworkStats,
    pub gpu: GpuStats,
    pub system: SystemStats,
}
