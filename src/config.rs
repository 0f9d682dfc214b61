use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// Runtime configuration.
///
/// Loaded from an optional YAML file named by the `PRODA_CONFIG` environment
/// variable; the `LISTEN` variable overrides the listen address either way.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address to bind, as `<ipv4>:<port>`
    pub listen_addr: String,
    /// Minimum log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Directory the page files are served from
    pub pages_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            pages_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = match std::env::var("PRODA_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Config::default(),
        };
        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        cfg
    }

    fn from_file(path: &str) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cannot read config file {}: {}", path, e);
                return Config::default();
            }
        };
        match serde_yaml::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Invalid config file {}: {}", path, e);
                Config::default()
            }
        }
    }
}
