// Linux-specific helpers: /proc, /etc/os-release, /sys/class/net.
// Each returns None / a neutral default off-Linux or when the file is absent.

/// First "model name" from /proc/cpuinfo. Preferred over sysinfo when the
/// latter reports placeholder names like "cpu0".
pub(super) fn read_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Distro pretty name from /etc/os-release (PRETTY_NAME, falling back to NAME).
pub(super) fn read_os_pretty_name() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        for key in ["PRETTY_NAME=", "NAME="] {
            for line in content.lines() {
                if let Some(v) = line.strip_prefix(key) {
                    let v = v.trim_matches('"');
                    if !v.is_empty() {
                        return Some(v.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Max CPU frequency in MHz from cpufreq (kHz in sysfs).
pub(super) fn read_cpu_max_freq_mhz() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let content =
            std::fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq")
                .ok()?;
        let khz: u64 = content.trim().parse().ok()?;
        if khz > 0 {
            return Some(khz / 1000);
        }
    }
    None
}

/// Interface link speed in bits per second, or 0 if unavailable.
pub(super) fn interface_speed_bps(interface_name: &str) -> u64 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/speed", interface_name);
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(mbps) = content.trim().parse::<i64>()
            && mbps > 0
        {
            return (mbps as u64) * 1_000_000;
        }
    }
    let _ = interface_name;
    0
}

/// Interface operational state from /sys/class/net/<if>/operstate.
/// Defaults to true where the kernel does not expose a state.
pub(super) fn interface_is_up(interface_name: &str) -> bool {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/operstate", interface_name);
        if let Ok(state) = std::fs::read_to_string(&path) {
            return state.trim() != "down";
        }
    }
    let _ = interface_name;
    true
}
