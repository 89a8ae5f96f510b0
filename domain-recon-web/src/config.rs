//! Web server configuration.
//!
//! Loaded from `domain-recon-web.toml` in the working directory (path
//! overridable via `DOMAIN_RECON_WEB_CONFIG`); every field can additionally
//! be overridden with a `DOMAIN_RECON_WEB_*` environment variable. A missing
//! file falls back to the defaults.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "domain-recon-web.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address the HTTP server binds to.
    pub bind_host: String,
    /// Port the HTTP server binds to.
    pub bind_port: u16,
    /// Directory the CSV/JSON exports are written to and served from.
    pub output_dir: PathBuf,
    /// Directory for daily-rolling log files; unset keeps logging on stderr only.
    pub log_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            bind_port: 8080,
            output_dir: PathBuf::from("."),
            log_dir: None,
        }
    }
}

impl WebConfig {
    /// Load the configuration file (when present) and apply env overrides.
    pub fn load() -> Result<Self> {
        let path = env::var("DOMAIN_RECON_WEB_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("DOMAIN_RECON_WEB_BIND_HOST") {
            self.bind_host = host;
        }
        if let Ok(port) = env::var("DOMAIN_RECON_WEB_BIND_PORT") {
            self.bind_port = port
                .parse()
                .with_context(|| format!("Invalid DOMAIN_RECON_WEB_BIND_PORT: {port}"))?;
        }
        if let Ok(dir) = env::var("DOMAIN_RECON_WEB_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("DOMAIN_RECON_WEB_LOG_DIR") {
            self.log_dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }
        Ok(())
    }
}
