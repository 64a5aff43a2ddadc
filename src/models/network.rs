// Network interface and traffic models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceStat {
    pub name: String,
    pub mac_address: String,
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    /// Link speed in bits per second, 0 when the driver does not report one.
    pub speed: u64,
    pub is_up: bool,
}

/// Host-wide traffic totals plus derived throughput and the interface list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    #[serde(default)]
    pub sent_bytes_per_sec: f64,
    #[serde(default)]
    pub recv_bytes_per_sec: f64,
    pub interfaces: Vec<InterfaceStat>,
}
