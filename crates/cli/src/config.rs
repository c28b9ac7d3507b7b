// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration.
//!
//! Configuration lives in `config.toml` inside the state directory and is
//! optional; every field has a default. The remote base URL is resolved once
//! at startup from the environment override, the config file, or a default
//! derived from the host and port the remote service listens on.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_DIR_NAME: &str = "ultisync";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "8000";

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote base URL. Overridden by `ULTISTATS_API_URL`.
    pub api_url: Option<String>,
    /// Delay between drain passes while entries remain queued.
    pub retry_delay_secs: u64,
    /// Upper bound on a single remote call.
    pub request_timeout_secs: u64,
    /// Health probe interval for `watch` (0 disables probing).
    pub probe_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: None,
            retry_delay_secs: 5,
            request_timeout_secs: 10,
            probe_interval_secs: 30,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the state directory, or defaults if absent.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Resolves the remote base URL, without a trailing slash.
    ///
    /// Reads the environment, so call it once at startup and keep the result.
    pub fn resolve_api_url(&self) -> String {
        let url = env::api_url()
            .or_else(|| self.api_url.clone().filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(default_api_url);
        url.trim_end_matches('/').to_string()
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Probe interval, or `None` when probing is disabled.
    pub fn probe_interval(&self) -> Option<Duration> {
        (self.probe_interval_secs > 0).then(|| Duration::from_secs(self.probe_interval_secs))
    }
}

/// Default base URL from `ULTISTATS_HOST` and `ULTISTATS_PORT`.
pub fn default_api_url() -> String {
    let host = env::api_host().unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = env::api_port().unwrap_or_else(|| DEFAULT_PORT.to_string());
    format!("http://{}:{}", host, port)
}

/// Resolves the state directory.
///
/// Precedence: explicit flag, `ULTISYNC_STATE_DIR`, `$XDG_STATE_HOME/ultisync`,
/// then `~/.local/state/ultisync`.
pub fn state_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::state_dir() {
        return Ok(dir);
    }
    if let Some(xdg) = env::xdg_state_home() {
        return Ok(xdg.join(STATE_DIR_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(".local").join("state").join(STATE_DIR_NAME))
        .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
