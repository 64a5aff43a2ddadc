// Unified sampling: one entry point combining the OS sub-records with
// derived throughput. One shared instance serves both the live-query path
// and the recording loop, so both see the same rate epoch.

use crate::error::MonitorError;
use crate::gpu_repo::GpuRepo;
use crate::models::*;
use crate::sysinfo_repo::SysinfoRepo;
use std::sync::Arc;
use std::time::Instant;

/// Cumulative byte counters carried from one sample to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCounters {
    pub disk_read_bytes: u64,
    pub disk_write_bytes: u64,
    pub net_bytes_sent: u64,
    pub net_bytes_recv: u64,
}

/// Throughput derived from two counter readings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Throughput {
    pub disk_read_bps: f64,
    pub disk_write_bps: f64,
    pub net_sent_bps: f64,
    pub net_recv_bps: f64,
}

/// `(curr - prev) / elapsed` on monotonic elapsed seconds. Non-positive
/// elapsed yields zero rates, never NaN; counter wraparound (curr < prev)
/// clamps that delta to zero.
pub fn throughput(prev: &RateCounters, curr: &RateCounters, elapsed_secs: f64) -> Throughput {
    if elapsed_secs <= 0.0 {
        return Throughput::default();
    }
    let rate = |curr: u64, prev: u64| curr.saturating_sub(prev) as f64 / elapsed_secs;
    Throughput {
        disk_read_bps: rate(curr.disk_read_bytes, prev.disk_read_bytes),
        disk_write_bps: rate(curr.disk_write_bytes, prev.disk_write_bytes),
        net_sent_bps: rate(curr.net_bytes_sent, prev.net_bytes_sent),
        net_recv_bps: rate(curr.net_bytes_recv, prev.net_bytes_recv),
    }
}

/// Previous counters plus when they were read. Single writer: `sample()`
/// under the mutex; readings from different Sampler instances never mix.
struct RateState {
    counters: RateCounters,
    at: Instant,
}

pub struct Sampler {
    sysinfo: Arc<SysinfoRepo>,
    gpu: Arc<dyn GpuRepo>,
    rate_state: std::sync::Mutex<Option<RateState>>,
}

impl Sampler {
    pub fn new(sysinfo: Arc<SysinfoRepo>, gpu: Arc<dyn GpuRepo>) -> Self {
        Self {
            sysinfo,
            gpu,
            rate_state: std::sync::Mutex::new(None),
        }
    }

    /// One unified reading of all monitored resources. CPU and memory
    /// failures abort the sample; the remaining sub-records degrade to
    /// defaults so a partial snapshot is still produced.
    pub async fn sample(&self) -> Result<ResourceSnapshot, MonitorError> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
                0
            });

        let cpu = self.sysinfo.get_cpu_stats().await?;
        let memory = self.sysinfo.get_memory_stats().await?;
        let mut disk = match self.sysinfo.get_disk_stats().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, operation = "get_disk_stats", "disk stats failed; empty sub-record");
                DiskStats::default()
            }
        };
        let mut network = match self.sysinfo.get_network_stats().await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, operation = "get_network_stats", "network stats failed; empty sub-record");
                NetworkStats::default()
            }
        };
        let system = match self.sysinfo.get_system_stats().await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, operation = "get_system_stats", "system stats failed; empty sub-record");
                SystemStats::default()
            }
        };
        let gpu = {
            let repo = self.gpu.clone();
            match tokio::task::spawn_blocking(move || repo.read_stats()).await {
                Ok(g) => g,
                Err(e) => {
                    tracing::warn!(error = %e, operation = "get_gpu_stats", "gpu task join failed; empty sub-record");
                    GpuStats::default()
                }
            }
        };

        let curr = RateCounters {
            disk_read_bytes: disk.io.read_bytes,
            disk_write_bytes: disk.io.write_bytes,
            net_bytes_sent: network.bytes_sent,
            net_bytes_recv: network.bytes_recv,
        };
        // Read-modify-write of the shared rate state under one lock
        // acquisition; interleaved samples cannot lose an update.
        let now = Instant::now();
        let rates = match self.rate_state.lock() {
            Ok(mut guard) => {
                let rates = match guard.as_ref() {
                    Some(prev) => {
                        throughput(&prev.counters, &curr, now.duration_since(prev.at).as_secs_f64())
                    }
                    None => Throughput::default(),
                };
                *guard = Some(RateState { counters: curr, at: now });
                rates
            }
            Err(_) => Throughput::default(),
        };
        disk.io.read_bytes_per_sec = rates.disk_read_bps;
        disk.io.write_bytes_per_sec = rates.disk_write_bps;
        network.sent_bytes_per_sec = rates.net_sent_bps;
        network.recv_bytes_per_sec = rates.net_recv_bps;

        Ok(ResourceSnapshot {
            timestamp,
            cpu,
            memory,
            disk,
            network,
            gpu,
            system,
        })
    }
}
