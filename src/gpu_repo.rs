// GPU capability probe. Resolved once at startup: hosts with a working
// NVIDIA driver get the nvidia-smi backed reader, everything else a null
// reader reporting `available: false`.

use crate::models::{GpuDeviceStat, GpuStats};
use std::process::Command;
use std::sync::Arc;

const MIB: u64 = 1024 * 1024;
const QUERY_FIELDS: &str =
    "index,name,utilization.gpu,memory.total,memory.used,memory.free,temperature.gpu";

pub trait GpuRepo: Send + Sync {
    /// One point-in-time GPU reading. Driver trouble mid-run degrades to
    /// `available: false` rather than an error.
    fn read_stats(&self) -> GpuStats;
}

/// No GPU capability on this host.
pub struct NullGpuRepo;

impl GpuRepo for NullGpuRepo {
    fn read_stats(&self) -> GpuStats {
        GpuStats::default()
    }
}

/// Reads GPU metrics through the NVIDIA management CLI, which ships with the
/// driver everywhere the driver is installed.
pub struct NvidiaSmiRepo;

impl GpuRepo for NvidiaSmiRepo {
    fn read_stats(&self) -> GpuStats {
        match query_nvidia_smi() {
            Ok(out) => {
                let gpus = parse_smi_output(&out);
                GpuStats {
                    available: !gpus.is_empty(),
                    gpus,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, operation = "read_gpu_stats", "nvidia-smi query failed");
                GpuStats::default()
            }
        }
    }
}

/// Probes for GPU support once at startup.
pub fn detect() -> Arc<dyn GpuRepo> {
    match query_nvidia_smi() {
        Ok(out) => {
            let gpus = parse_smi_output(&out);
            tracing::info!(gpus = gpus.len(), "NVIDIA GPU metrics enabled");
            Arc::new(NvidiaSmiRepo)
        }
        Err(_) => {
            tracing::debug!("nvidia-smi not usable; GPU metrics disabled");
            Arc::new(NullGpuRepo)
        }
    }
}

fn query_nvidia_smi() -> anyhow::Result<String> {
    let output = Command::new("nvidia-smi")
        .arg(format!("--query-gpu={}", QUERY_FIELDS))
        .arg("--format=csv,noheader,nounits")
        .output()?;
    anyhow::ensure!(
        output.status.success(),
        "nvidia-smi exited with {}",
        output.status
    );
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses `csv,noheader,nounits` rows; memory columns are MiB. Fields the
/// driver cannot report ("[N/A]") become absences, never zero readings.
pub fn parse_smi_output(out: &str) -> Vec<GpuDeviceStat> {
    let mut gpus = Vec::new();
    for line in out.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        if fields.len() != 7 {
            tracing::warn!(line, operation = "parse_gpu_row", "unexpected nvidia-smi row; skipped");
            continue;
        }
        let (Ok(id), Ok(mem_total_mib), Ok(mem_used_mib), Ok(mem_free_mib)) = (
            fields[0].parse::<u32>(),
            fields[3].parse::<u64>(),
            fields[4].parse::<u64>(),
            fields[5].parse::<u64>(),
        ) else {
            tracing::warn!(line, operation = "parse_gpu_row", "unparseable nvidia-smi row; skipped");
            continue;
        };
        let memory_total = mem_total_mib * MIB;
        let memory_used = mem_used_mib * MIB;
        gpus.push(GpuDeviceStat {
            id,
            name: fields[1].to_string(),
            load_percent: fields[2].parse().unwrap_or(0.0),
            memory_total,
            memory_used,
            memory_free: mem_free_mib * MIB,
            memory_percent: if memory_total > 0 {
                (memory_used as f64 / memory_total as f64) * 100.0
            } else {
                0.0
            },
            temperature: fields[6].parse().ok(),
        });
    }
    gpus
}
