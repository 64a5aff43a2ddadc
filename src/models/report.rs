// Report aggregate: summary statistics over one closed recording series.

use serde::{Deserialize, Serialize};

use super::{PartitionStat, SystemInfo};

/// avg/min/max over one metric series. Full precision is kept here; rounding
/// for display is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSummary {
    pub mount: String,
    pub usage_percent: MetricSummary,
}

/// Summaries for the first reported GPU per sample ("primary GPU").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuSummary {
    pub load_percent: MetricSummary,
    pub memory_percent: MetricSummary,
    pub temperature: Option<MetricSummary>,
}

/// Raw per-tick vectors for charting, parallel to recorded sample order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSeries {
    pub timestamps: Vec<u64>,
    pub cpu_percent: Vec<f64>,
    pub memory_percent: Vec<f64>,
    pub disk_read_bytes_per_sec: Vec<f64>,
    pub disk_write_bytes_per_sec: Vec<f64>,
    pub net_sent_bytes_per_sec: Vec<f64>,
    pub net_recv_bytes_per_sec: Vec<f64>,
    #[serde(default)]
    pub gpu_load_percent: Vec<f64>,
    #[serde(default)]
    pub gpu_memory_percent: Vec<f64>,
}

/// Built once per report request from a closed buffer; consumed by the
/// external report renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAggregate {
    pub started_at: String,
    pub ended_at: String,
    pub sample_count: usize,
    pub system: SystemInfo,
    pub cpu_percent: MetricSummary,
    pub cpu_temperature: Option<MetricSummary>,
    pub memory_percent: MetricSummary,
    pub disk_read_bytes_per_sec: MetricSummary,
    pub disk_write_bytes_per_sec: MetricSummary,
    pub net_sent_bytes_per_sec: MetricSummary,
    pub net_recv_bytes_per_sec: MetricSummary,
    pub gpu: Option<GpuSummary>,
    pub partitions: Vec<PartitionSummary>,
    /// Partition usage from the last sample, for the report's disk table.
    pub partition_table: Vec<PartitionStat>,
    pub series: ReportSeries,
}
