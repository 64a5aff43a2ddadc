// Domain models (wire format: camelCase JSON)

mod gpu;
mod network;
mod recording;
mod report;
mod storage;
mod system;

pub use gpu::{GpuDeviceStat, GpuStats};
pub use network::{InterfaceStat, NetworkStats};
pub use recording::RecordingStatus;
pub use report::{GpuSummary, MetricSummary, PartitionSummary, ReportAggregate, ReportSeries};
pub use storage::{DiskIoStats, DiskStats, PartitionStat};
pub use system::{CpuStats, MemoryStats, ResourceSnapshot, SystemInfo, SystemStats};
