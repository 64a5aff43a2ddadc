// Shared test helpers

use syswatch::models::*;

#[allow(dead_code)]
pub fn minimal_snapshot(timestamp: u64) -> ResourceSnapshot {
    ResourceSnapshot {
        timestamp,
        cpu: CpuStats {
            usage_percent: 0.0,
            per_core: vec![],
            frequency_mhz: 0,
            frequency_max_mhz: 0,
            physical_cores: 0,
            logical_cores: 0,
            temperature: None,
        },
        memory: MemoryStats {
            total: 0,
            used: 0,
            available: 0,
            usage_percent: 0.0,
            swap_total: 0,
            swap_used: 0,
            swap_percent: 0.0,
        },
        disk: DiskStats::default(),
        network: NetworkStats::default(),
        gpu: GpuStats::default(),
        system: SystemStats::default(),
    }
}

#[allow(dead_code)]
pub fn snapshot_with(timestamp: u64, cpu_percent: f64, memory_percent: f64) -> ResourceSnapshot {
    let mut s = minimal_snapshot(timestamp);
    s.cpu.usage_percent = cpu_percent;
    s.memory.usage_percent = memory_percent;
    s
}

#[allow(dead_code)]
pub fn test_system_info() -> SystemInfo {
    SystemInfo {
        os_family: "Linux".into(),
        os_manufacturer: "Test Linux".into(),
        os_version: "6.1".into(),
        hostname: "testhost".into(),
        processor_name: "Test CPU".into(),
    }
}
