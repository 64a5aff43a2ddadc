// GPU models. Absence is explicit (`available: false`, `temperature: None`),
// never a zero sentinel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuDeviceStat {
    pub id: u32,
    pub name: String,
    pub load_percent: f64,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_free: u64,
    pub memory_percent: f64,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuStats {
    pub available: bool,
    pub gpus: Vec<GpuDeviceStat>,
}
