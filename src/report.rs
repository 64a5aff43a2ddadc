// Closed-series aggregation: per-metric avg/min/max plus the raw series the
// report renderer charts. Full precision throughout; rounding is display.

use crate::error::MonitorError;
use crate::models::*;
use std::collections::HashMap;

/// A single sample cannot show a trend; enforced here even when the serving
/// layer pre-checks.
pub const MIN_REPORT_SAMPLES: usize = 2;

pub fn build_report(
    series: &[ResourceSnapshot],
    system: &SystemInfo,
    start_label: &str,
    end_label: &str,
) -> Result<ReportAggregate, MonitorError> {
    if series.len() < MIN_REPORT_SAMPLES {
        return Err(MonitorError::InsufficientData {
            got: series.len(),
            need: MIN_REPORT_SAMPLES,
        });
    }

    let cpu_percent: Vec<f64> = series.iter().map(|s| s.cpu.usage_percent).collect();
    let memory_percent: Vec<f64> = series.iter().map(|s| s.memory.usage_percent).collect();
    let disk_read: Vec<f64> = series.iter().map(|s| s.disk.io.read_bytes_per_sec).collect();
    let disk_write: Vec<f64> = series
        .iter()
        .map(|s| s.disk.io.write_bytes_per_sec)
        .collect();
    let net_sent: Vec<f64> = series.iter().map(|s| s.network.sent_bytes_per_sec).collect();
    let net_recv: Vec<f64> = series.iter().map(|s| s.network.recv_bytes_per_sec).collect();

    // Missing readings are excluded from their own statistic, never counted
    // as zero.
    let cpu_temperature = summarize_present(series.iter().map(|s| s.cpu.temperature));
    let (gpu, gpu_load, gpu_memory) = gpu_summary(series);

    let last = &series[series.len() - 1];

    Ok(ReportAggregate {
        started_at: start_label.to_string(),
        ended_at: end_label.to_string(),
        sample_count: series.len(),
        system: system.clone(),
        cpu_percent: summarize(&cpu_percent),
        cpu_temperature,
        memory_percent: summarize(&memory_percent),
        disk_read_bytes_per_sec: summarize(&disk_read),
        disk_write_bytes_per_sec: summarize(&disk_write),
        net_sent_bytes_per_sec: summarize(&net_sent),
        net_recv_bytes_per_sec: summarize(&net_recv),
        gpu,
        partitions: partition_summaries(series),
        partition_table: last.disk.partitions.clone(),
        series: ReportSeries {
            timestamps: series.iter().map(|s| s.timestamp).collect(),
            cpu_percent,
            memory_percent,
            disk_read_bytes_per_sec: disk_read,
            disk_write_bytes_per_sec: disk_write,
            net_sent_bytes_per_sec: net_sent,
            net_recv_bytes_per_sec: net_recv,
            gpu_load_percent: gpu_load,
            gpu_memory_percent: gpu_memory,
        },
    })
}

/// Wall-clock label for a sample timestamp (unix millis, local time).
pub fn timestamp_label(ts_millis: u64) -> String {
    chrono::DateTime::from_timestamp_millis(ts_millis as i64)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

fn summarize(values: &[f64]) -> MetricSummary {
    if values.is_empty() {
        return MetricSummary {
            avg: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    MetricSummary {
        avg: mean_f64(values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Summary over the present values only; `None` when nothing was reported.
fn summarize_present(values: impl Iterator<Item = Option<f64>>) -> Option<MetricSummary> {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(summarize(&present))
    }
}

/// First reported GPU per sample ("primary GPU"); samples without a GPU
/// reading are excluded. Returns the summary plus the chart series.
fn gpu_summary(series: &[ResourceSnapshot]) -> (Option<GpuSummary>, Vec<f64>, Vec<f64>) {
    let mut load = Vec::new();
    let mut memory = Vec::new();
    let mut temperature = Vec::new();
    for s in series {
        if !s.gpu.available {
            continue;
        }
        let Some(first) = s.gpu.gpus.first() else {
            continue;
        };
        load.push(first.load_percent);
        memory.push(first.memory_percent);
        if let Some(t) = first.temperature {
            temperature.push(t);
        }
    }
    if load.is_empty() {
        return (None, Vec::new(), Vec::new());
    }
    let summary = GpuSummary {
        load_percent: summarize(&load),
        memory_percent: summarize(&memory),
        temperature: if temperature.is_empty() {
            None
        } else {
            Some(summarize(&temperature))
        },
    };
    (Some(summary), load, memory)
}

/// Usage-percent summary per mount across the whole series.
fn partition_summaries(series: &[ResourceSnapshot]) -> Vec<PartitionSummary> {
    let mut by_mount: HashMap<String, Vec<f64>> = HashMap::new();
    for s in series {
        for p in &s.disk.partitions {
            by_mount
                .entry(p.mount.clone())
                .or_default()
                .push(p.usage_percent);
        }
    }
    let mut out: Vec<PartitionSummary> = by_mount
        .into_iter()
        .map(|(mount, values)| PartitionSummary {
            mount,
            usage_percent: summarize(&values),
        })
        .collect();
    out.sort_by(|a, b| a.mount.cmp(&b.mount));
    out
}

fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
