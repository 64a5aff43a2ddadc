// OS metric snapshots via sysinfo. Every read returns a fresh immutable
// sub-record; cumulative counters (disk/network bytes) are reported as-is,
// rate derivation lives in the sampler.

mod linux;

use crate::models::*;
use std::sync::Arc;
use std::time::Instant;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

/// CPU usage cached between refreshes; sysinfo needs
/// MINIMUM_CPU_UPDATE_INTERVAL between refreshes for meaningful deltas.
struct CpuReading {
    at: Instant,
    global: f64,
    per_core: Vec<f64>,
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    components: Arc<std::sync::Mutex<Components>>,
    last_cpu: Arc<std::sync::Mutex<Option<CpuReading>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        let components = Components::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
            components: Arc::new(std::sync::Mutex::new(components)),
            last_cpu: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_stats"))]
    pub async fn get_cpu_stats(&self) -> anyhow::Result<CpuStats> {
        let sys = self.sys.clone();
        let components = self.components.clone();
        let last_cpu = self.last_cpu.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;

            let now = Instant::now();
            let mut guard = last_cpu
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu cache lock poisoned: {}", e))?;
            let stale = match guard.as_ref() {
                Some(prev) => now.duration_since(prev.at) >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL,
                None => true,
            };
            if stale {
                sys.refresh_cpu_all();
                *guard = Some(CpuReading {
                    at: now,
                    global: sys.global_cpu_usage() as f64,
                    per_core: sys.cpus().iter().map(|c| c.cpu_usage() as f64).collect(),
                });
            }
            let (usage, per_core) = match guard.as_ref() {
                Some(r) => (r.global.clamp(0.0, 100.0), r.per_core.clone()),
                None => (0.0, Vec::new()),
            };
            drop(guard);

            let frequency_mhz = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0);
            let frequency_max_mhz = linux::read_cpu_max_freq_mhz().unwrap_or(frequency_mhz);
            let physical = System::physical_core_count().unwrap_or(0) as u32;
            let logical = sys.cpus().len() as u32;
            drop(sys);

            let temperature = match components.lock() {
                Ok(mut comps) => {
                    comps.refresh(false);
                    cpu_temperature(&comps)
                }
                Err(_) => None,
            };

            Ok(CpuStats {
                usage_percent: usage,
                per_core,
                frequency_mhz,
                frequency_max_mhz,
                physical_cores: physical,
                logical_cores: logical,
                temperature,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_stats"))]
    pub async fn get_memory_stats(&self) -> anyhow::Result<MemoryStats> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let available = sys.available_memory();
            let used = total.saturating_sub(available);
            let swap_total = sys.total_swap();
            let swap_used = sys.used_swap();

            Ok(MemoryStats {
                total,
                used,
                available,
                usage_percent: percent_of(used, total),
                swap_total,
                swap_used,
                swap_percent: percent_of(swap_used, swap_total),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Partitions plus host-wide cumulative I/O counters. The per-second
    /// fields stay zero here; the sampler derives them.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_disk_stats"))]
    pub async fn get_disk_stats(&self) -> anyhow::Result<DiskStats> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(true);

            let partitions: Vec<PartitionStat> = disks_guard
                .list()
                .iter()
                .map(|d| {
                    let total = d.total_space();
                    let available = d.available_space();
                    let used = total.saturating_sub(available);
                    PartitionStat {
                        mount: d.mount_point().to_string_lossy().into_owned(),
                        name: d.name().to_string_lossy().into_owned(),
                        type_: d.file_system().to_string_lossy().into_owned(),
                        total_space: total,
                        used_space: used,
                        available_space: available,
                        usage_percent: percent_of(used, total),
                    }
                })
                .collect();

            let mut read_bytes: u64 = 0;
            let mut write_bytes: u64 = 0;
            for d in disks_guard.list() {
                let usage = d.usage();
                read_bytes = read_bytes.saturating_add(usage.total_read_bytes);
                write_bytes = write_bytes.saturating_add(usage.total_written_bytes);
            }

            Ok(DiskStats {
                partitions,
                io: DiskIoStats {
                    read_bytes,
                    write_bytes,
                    read_bytes_per_sec: 0.0,
                    write_bytes_per_sec: 0.0,
                },
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Host-wide traffic totals and the interface list. Per-second fields
    /// stay zero here; the sampler derives them.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_network_stats"))]
    pub async fn get_network_stats(&self) -> anyhow::Result<NetworkStats> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);

            let mut bytes_sent: u64 = 0;
            let mut bytes_recv: u64 = 0;
            let mut packets_sent: u64 = 0;
            let mut packets_recv: u64 = 0;
            let mut interfaces: Vec<InterfaceStat> = Vec::new();

            for (name, data) in networks_guard.list() {
                bytes_sent = bytes_sent.saturating_add(data.total_transmitted());
                bytes_recv = bytes_recv.saturating_add(data.total_received());
                packets_sent = packets_sent.saturating_add(data.total_packets_transmitted());
                packets_recv = packets_recv.saturating_add(data.total_packets_received());
                interfaces.push(InterfaceStat {
                    name: name.clone(),
                    mac_address: data.mac_address().to_string(),
                    ipv4: data
                        .ip_networks()
                        .iter()
                        .filter(|n| n.addr.is_ipv4())
                        .map(|n| n.addr.to_string())
                        .collect(),
                    ipv6: data
                        .ip_networks()
                        .iter()
                        .filter(|n| n.addr.is_ipv6())
                        .map(|n| n.addr.to_string())
                        .collect(),
                    speed: linux::interface_speed_bps(name),
                    is_up: linux::interface_is_up(name),
                });
            }
            interfaces.sort_by(|a, b| a.name.cmp(&b.name));

            Ok(NetworkStats {
                bytes_sent,
                bytes_recv,
                packets_sent,
                packets_recv,
                sent_bytes_per_sec: 0.0,
                recv_bytes_per_sec: 0.0,
                interfaces,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Static identity; fetched once at startup (GET /api/info, report header).
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_system_info"))]
    pub async fn get_system_info(&self) -> anyhow::Result<SystemInfo> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let processor_name = linux::read_cpu_model()
                .or_else(|| {
                    sys.cpus()
                        .first()
                        .map(|c| c.name().to_string())
                        .filter(|s| !s.is_empty() && s != "cpu0")
                })
                .unwrap_or_else(|| "Unknown".into());
            Ok(SystemInfo {
                os_family: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
                os_manufacturer: linux::read_os_pretty_name().unwrap_or_default(),
                os_version: System::os_version().unwrap_or_default(),
                hostname: System::host_name().unwrap_or_default(),
                processor_name,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Per-sample system record (identity plus uptime).
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_system_stats"))]
    pub async fn get_system_stats(&self) -> anyhow::Result<SystemStats> {
        tokio::task::spawn_blocking(|| {
            Ok(SystemStats {
                os_family: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
                os_version: System::os_version().unwrap_or_default(),
                hostname: System::host_name().unwrap_or_default(),
                uptime_secs: System::uptime(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

/// Prefer a CPU-ish sensor label; fall back to the first component that
/// reports anything. `None` when no sensor reports a temperature.
fn cpu_temperature(components: &Components) -> Option<f64> {
    const CPU_LABELS: [&str; 5] = ["coretemp", "k10temp", "package", "tctl", "cpu"];
    let mut first: Option<f64> = None;
    for c in components.list() {
        let Some(t) = c.temperature() else { continue };
        let label = c.label().to_lowercase();
        if CPU_LABELS.iter().any(|m| label.contains(m)) {
            return Some(t as f64);
        }
        if first.is_none() {
            first = Some(t as f64);
        }
    }
    first
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total > 0 {
        (used as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
