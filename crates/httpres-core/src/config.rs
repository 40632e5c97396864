use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::access::AccessPolicy;
use crate::adapter::AdapterConfig;
use crate::timestamp::TimestampMode;
use crate::transport::CurlSettings;

/// Transport defaults (optional `[transport]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Connect timeout in seconds, applied before per-request options.
    pub connect_timeout_secs: u64,
    /// User-Agent sent unless a request sets `user_agent`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let curl = CurlSettings::default();
        Self {
            connect_timeout_secs: curl.connect_timeout.as_secs(),
            user_agent: curl.user_agent,
        }
    }
}

/// Access policy (optional `[access]` section). Absent means every request is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Hosts (and their sub-domains) requests may go to. Empty allows all hosts.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
    /// Forces `follow_location` on every request.
    #[serde(default)]
    pub follow_redirects: Option<bool>,
    /// Forces `max_redirections` on every request.
    #[serde(default)]
    pub max_redirections: Option<u64>,
    /// Forces a total `timeout` (seconds) on every request.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Global configuration loaded from `~/.config/httpres/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpresConfig {
    /// Default timestamp mode: "server" (response headers) or "client" (fetch time).
    #[serde(default)]
    pub timestamp: TimestampMode,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub access: Option<AccessConfig>,
}

impl HttpresConfig {
    /// Runtime configuration for `HttpAdapter`.
    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            access: self.access.as_ref().map(AccessPolicy::from_config),
            timestamp: self.timestamp,
        }
    }

    pub fn curl_settings(&self) -> CurlSettings {
        CurlSettings {
            connect_timeout: Duration::from_secs(self.transport.connect_timeout_secs),
            user_agent: self.transport.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("httpres")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HttpresConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HttpresConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<HttpresConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: HttpresConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
