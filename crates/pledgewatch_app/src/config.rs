//! Optional RON configuration file for the watcher.
//!
//! Every field has a default, so an empty `()` file is valid. Command-line
//! flags are applied on top by `Cli::apply_overrides`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pledgewatch_engine::{FetchSettings, RetryPolicy, WatchSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use watch_logging::watch_debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub poll_interval_secs: u64,
    pub retry_delay_secs: u64,
    /// `None` retries forever.
    pub max_fetch_attempts: Option<u32>,
    pub grace_delay_secs: u64,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_body_bytes: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            retry_delay_secs: 60,
            max_fetch_attempts: None,
            grace_delay_secs: 10,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_body_bytes: FetchSettings::default().max_bytes,
            log_file: None,
        }
    }
}

impl WatchConfig {
    pub fn watch_settings(&self) -> WatchSettings {
        let delay = Duration::from_secs(self.retry_delay_secs);
        WatchSettings {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            grace_delay: Duration::from_secs(self.grace_delay_secs),
            retry: match self.max_fetch_attempts {
                Some(max) => RetryPolicy::bounded(max, delay),
                None => RetryPolicy::unbounded(delay),
            },
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_body_bytes,
            ..FetchSettings::default()
        }
    }
}

pub fn load_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: WatchConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    watch_debug!("loaded config from {:?}: {:?}", path, config);
    Ok(config)
}
