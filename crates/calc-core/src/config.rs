//! Configuration for the calculator client.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $CALC_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/calc/config.toml
//!   3. ~/.config/calc/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Orchestrator origin, without a trailing path.
    pub base_url: String,
    /// Per-request timeout. 0 = none.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between statistics polls.
    pub statistics_interval_secs: u64,
    pub overlap: OverlapPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub fetch_overlap: OverlapPolicy,
    /// Reject unparseable task ids / results before sending them.
    pub strict_numbers: bool,
}

/// What to do when a flow is triggered while its previous request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Issue the request anyway; responses apply in arrival order.
    #[default]
    Allow,
    /// Drop the trigger.
    SkipWhileInFlight,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(OverlapPolicy::Allow),
            "skip_while_in_flight" => Ok(OverlapPolicy::SkipWhileInFlight),
            other => Err(format!("unknown overlap policy '{}'", other)),
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 0,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            statistics_interval_secs: 5,
            overlap: OverlapPolicy::Allow,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            fetch_overlap: OverlapPolicy::Allow,
            strict_numbers: false,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl PollingConfig {
    /// Never zero; a zero interval would spin.
    pub fn statistics_interval(&self) -> Duration {
        Duration::from_secs(self.statistics_interval_secs.max(1))
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("calc")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl CalcConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            CalcConfig::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("CALC_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&CalcConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply CALC_* overrides. Unparseable values are ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("CALC_SERVER__BASE_URL") {
            self.server.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(Ok(secs)) = var("CALC_SERVER__REQUEST_TIMEOUT_SECS").map(|v| v.parse()) {
            self.server.request_timeout_secs = secs;
        }
        if let Some(Ok(secs)) = var("CALC_POLLING__STATISTICS_INTERVAL_SECS").map(|v| v.parse()) {
            self.polling.statistics_interval_secs = secs;
        }
        if let Some(Ok(policy)) = var("CALC_POLLING__OVERLAP").map(|v| v.parse()) {
            self.polling.overlap = policy;
        }
        if let Some(Ok(policy)) = var("CALC_WORKER__FETCH_OVERLAP").map(|v| v.parse()) {
            self.worker.fetch_overlap = policy;
        }
        if let Some(v) = var("CALC_WORKER__STRICT_NUMBERS") {
            self.worker.strict_numbers = v == "true" || v == "1";
        }
    }
}
