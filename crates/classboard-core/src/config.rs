use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const DEFAULT_LOG_FILTER: &str = "classboard=info";

/// Top-level config (classboard.toml + CLASSBOARD_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassboardConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How often the watch loop re-reads the store.
    /// Override with env var: CLASSBOARD_DASHBOARD__POLL_INTERVAL_SECS=10
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// JSON snapshot of schedules and teachers read by the CLI.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl DashboardConfig {
    /// Poll interval with the lower bound applied; a zero interval would spin.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
fn default_snapshot_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.classboard/snapshot.json", home)
}

impl ClassboardConfig {
    /// Load config from a TOML file with CLASSBOARD_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. CLASSBOARD_CONFIG env var
    ///   3. ~/.classboard/classboard.toml
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("CLASSBOARD_CONFIG").ok())
            .unwrap_or_else(default_config_path);

        tracing::debug!(path = %path, "loading config");

        let config: ClassboardConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CLASSBOARD_").split("__"))
            .extract()
            .map_err(|e| crate::error::ClassboardError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.classboard/classboard.toml", home)
}
