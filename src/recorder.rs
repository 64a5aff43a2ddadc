// Recording session manager: Idle -> Recording -> Idle, one session
// system-wide. A background task samples at a fixed cadence into the session
// buffer until the duration limit elapses or stop() cancels it
// cooperatively; stop() waits for the loop so it never lands mid-append.

use crate::error::MonitorError;
use crate::models::{RecordingStatus, ResourceSnapshot};
use crate::sampler::Sampler;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::time::{Duration, MissedTickBehavior, interval};

pub struct RecorderConfig {
    /// Hard cap on session length; the loop stops itself at this bound.
    pub duration_limit: Duration,
    pub sample_interval: Duration,
}

struct ActiveSession {
    stop_tx: oneshot::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

pub struct Recorder {
    sampler: Arc<Sampler>,
    config: RecorderConfig,
    active: Arc<AtomicBool>,
    buffer: Arc<std::sync::Mutex<Vec<ResourceSnapshot>>>,
    /// Wall clock for labels, Instant for elapsed math. Kept after stop so
    /// status keeps reporting the last session's start.
    started: std::sync::Mutex<Option<(DateTime<Local>, Instant)>>,
    session: std::sync::Mutex<Option<ActiveSession>>,
}

impl Recorder {
    pub fn new(sampler: Arc<Sampler>, config: RecorderConfig) -> Self {
        Self {
            sampler,
            config,
            active: Arc::new(AtomicBool::new(false)),
            buffer: Arc::new(std::sync::Mutex::new(Vec::new())),
            started: std::sync::Mutex::new(None),
            session: std::sync::Mutex::new(None),
        }
    }

    /// Starts a session: clears the buffer, records started-at, spawns the
    /// sampling loop. Fails while a session is active, leaving the existing
    /// buffer untouched.
    pub fn start(&self) -> Result<RecordingStatus, MonitorError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| MonitorError::Provider(anyhow::anyhow!("session lock poisoned: {e}")))?;
        if self.active.load(Ordering::SeqCst) {
            return Err(MonitorError::AlreadyRecording);
        }

        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
        let started_mono = Instant::now();
        if let Ok(mut started) = self.started.lock() {
            *started = Some((Local::now(), started_mono));
        }
        self.active.store(true, Ordering::SeqCst);

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_loop(
            self.sampler.clone(),
            self.buffer.clone(),
            self.active.clone(),
            started_mono,
            self.config.duration_limit,
            self.config.sample_interval,
            stop_rx,
        ));
        *session = Some(ActiveSession { stop_tx, task });
        tracing::info!(
            duration_limit_secs = self.config.duration_limit.as_secs(),
            sample_interval_ms = self.config.sample_interval.as_millis() as u64,
            "recording started"
        );
        Ok(self.status())
    }

    /// Cancels the loop and waits for it to exit. Not-recording is a no-op
    /// condition the caller reports, not a failure of the recorder. The
    /// buffer keeps its samples until the next start().
    pub async fn stop(&self) -> Result<RecordingStatus, MonitorError> {
        let taken = {
            let mut guard = self.session.lock().map_err(|e| {
                MonitorError::Provider(anyhow::anyhow!("session lock poisoned: {e}"))
            })?;
            guard.take()
        };
        match taken {
            Some(session) if self.active.load(Ordering::SeqCst) => {
                let _ = session.stop_tx.send(());
                if let Err(e) = session.task.await {
                    tracing::warn!(error = %e, operation = "stop_recording", "recording task join failed");
                }
                let status = self.status();
                tracing::info!(samples = status.sample_count, "recording stopped");
                Ok(status)
            }
            _ => Err(MonitorError::NotRecording),
        }
    }

    /// Read-only status; safe to call concurrently with the loop. The count
    /// reads the buffer length without pausing the loop.
    pub fn status(&self) -> RecordingStatus {
        let active = self.active.load(Ordering::SeqCst);
        let sample_count = self.buffer.lock().map(|b| b.len()).unwrap_or(0);
        let started = self.started.lock().ok().and_then(|g| *g);
        let limit = self.config.duration_limit.as_secs();
        let (started_at, elapsed_seconds, remaining_seconds) = match started {
            Some((wall, mono)) => {
                let elapsed = if active { mono.elapsed().as_secs() } else { 0 };
                let remaining = if active { limit.saturating_sub(elapsed) } else { 0 };
                (
                    Some(wall.format("%Y-%m-%d %H:%M:%S").to_string()),
                    elapsed,
                    remaining,
                )
            }
            None => (None, 0, 0),
        };
        RecordingStatus {
            active,
            sample_count,
            started_at,
            elapsed_seconds,
            remaining_seconds,
            duration_limit_seconds: limit,
        }
    }

    /// Clone of the recorded series, chronological order. A clone taken
    /// mid-session is a closed prefix of the buffer.
    pub fn series(&self) -> Vec<ResourceSnapshot> {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

async fn run_loop(
    sampler: Arc<Sampler>,
    buffer: Arc<std::sync::Mutex<Vec<ResourceSnapshot>>>,
    active: Arc<AtomicBool>,
    started: Instant,
    duration_limit: Duration,
    sample_interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut tick = interval(sample_interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if !active.load(Ordering::SeqCst) {
                    break;
                }
                if started.elapsed() >= duration_limit {
                    tracing::info!(operation = "recording_expiry", "duration limit reached; recording stopped");
                    break;
                }
                match sampler.sample().await {
                    Ok(snapshot) => {
                        if let Ok(mut buf) = buffer.lock() {
                            buf.push(snapshot);
                        }
                    }
                    Err(e) => {
                        // Failed tick is dropped; the series gets sparser,
                        // recording continues.
                        tracing::warn!(error = %e, operation = "record_tick", "sample failed; tick skipped");
                    }
                }
            }
            _ = &mut stop_rx => {
                break;
            }
        }
    }
    active.store(false, Ordering::SeqCst);
}
