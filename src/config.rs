use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub recording: RecordingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingConfig {
    /// Hard cap on one recording session; the loop stops itself at this bound.
    #[serde(default = "default_duration_limit_secs")]
    pub duration_limit_secs: u64,
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

fn default_duration_limit_secs() -> u64 {
    300
}

fn default_sample_interval_ms() -> u64 {
    1000
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.recording.duration_limit_secs > 0,
            "recording.duration_limit_secs must be > 0, got {}",
            self.recording.duration_limit_secs
        );
        anyhow::ensure!(
            self.recording.sample_interval_ms > 0,
            "recording.sample_interval_ms must be > 0, got {}",
            self.recording.sample_interval_ms
        );
        Ok(())
    }
}
