// Rate math properties and sampler concurrency

use std::sync::Arc;
use syswatch::gpu_repo::NullGpuRepo;
use syswatch::sampler::{RateCounters, Sampler, Throughput, throughput};
use syswatch::sysinfo_repo::SysinfoRepo;

fn counters(read: u64, write: u64, sent: u64, recv: u64) -> RateCounters {
    RateCounters {
        disk_read_bytes: read,
        disk_write_bytes: write,
        net_bytes_sent: sent,
        net_bytes_recv: recv,
    }
}

#[test]
fn throughput_divides_delta_by_elapsed() {
    let prev = counters(0, 0, 0, 0);
    let curr = counters(1000, 2000, 512, 256);
    let t = throughput(&prev, &curr, 2.0);
    assert_eq!(t.disk_read_bps, 500.0);
    assert_eq!(t.disk_write_bps, 1000.0);
    assert_eq!(t.net_sent_bps, 256.0);
    assert_eq!(t.net_recv_bps, 128.0);
}

#[test]
fn throughput_zero_or_negative_elapsed_is_zero() {
    let prev = counters(0, 0, 0, 0);
    let curr = counters(1000, 1000, 1000, 1000);
    assert_eq!(throughput(&prev, &curr, 0.0), Throughput::default());
    assert_eq!(throughput(&prev, &curr, -1.0), Throughput::default());
}

#[test]
fn throughput_counter_wraparound_clamps_to_zero() {
    // Counter reset: curr < prev must clamp to 0, not go negative.
    let prev = counters(5000, 5000, 5000, 5000);
    let curr = counters(100, 6000, 100, 6000);
    let t = throughput(&prev, &curr, 1.0);
    assert_eq!(t.disk_read_bps, 0.0);
    assert_eq!(t.disk_write_bps, 1000.0);
    assert_eq!(t.net_sent_bps, 0.0);
    assert_eq!(t.net_recv_bps, 1000.0);
}

#[test]
fn throughput_is_never_negative_or_nan() {
    let values: [u64; 5] = [0, 1, 1000, u64::MAX / 2, u64::MAX];
    let elapsed: [f64; 4] = [-1.0, 0.0, 0.001, 10.0];
    for &p in &values {
        for &c in &values {
            for &dt in &elapsed {
                let t = throughput(&counters(p, p, p, p), &counters(c, c, c, c), dt);
                for rate in [t.disk_read_bps, t.disk_write_bps, t.net_sent_bps, t.net_recv_bps] {
                    assert!(rate.is_finite(), "rate not finite: {rate}");
                    assert!(rate >= 0.0, "rate negative: {rate}");
                }
            }
        }
    }
}

fn test_sampler() -> Arc<Sampler> {
    Arc::new(Sampler::new(
        Arc::new(SysinfoRepo::new()),
        Arc::new(NullGpuRepo),
    ))
}

#[tokio::test]
async fn first_sample_reports_zero_rates() {
    let sampler = test_sampler();
    let snapshot = sampler.sample().await.expect("sample");
    assert_eq!(snapshot.disk.io.read_bytes_per_sec, 0.0);
    assert_eq!(snapshot.disk.io.write_bytes_per_sec, 0.0);
    assert_eq!(snapshot.network.sent_bytes_per_sec, 0.0);
    assert_eq!(snapshot.network.recv_bytes_per_sec, 0.0);
    assert!(!snapshot.gpu.available);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_samples_keep_rates_finite_and_nonnegative() {
    let sampler = test_sampler();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let sampler = sampler.clone();
        handles.push(tokio::spawn(async move {
            let mut snapshots = Vec::new();
            for _ in 0..3 {
                snapshots.push(sampler.sample().await.expect("sample"));
            }
            snapshots
        }));
    }
    for handle in handles {
        for snapshot in handle.await.expect("join") {
            for rate in [
                snapshot.disk.io.read_bytes_per_sec,
                snapshot.disk.io.write_bytes_per_sec,
                snapshot.network.sent_bytes_per_sec,
                snapshot.network.recv_bytes_per_sec,
            ] {
                assert!(rate.is_finite(), "rate not finite: {rate}");
                assert!(rate >= 0.0, "rate negative: {rate}");
            }
        }
    }
}
