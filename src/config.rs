use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Server configuration, loaded from a YAML file.
///
/// Every field has a default, so an empty or absent file yields a working
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: Limits,
    /// Optional static file mount; absent means no files are served.
    #[serde(default)]
    pub static_files: Option<StaticFilesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Per-connection resource limits.
///
/// Header size is capped cumulatively because nothing announces it upfront;
/// body size is checked once against the parsed `content-length`. The read
/// timeout applies independently to the header phase and the body phase.
#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory that files are served from. Nothing outside it is ever
    /// served.
    pub root: PathBuf,
    /// Router path the static handler is mounted under.
    #[serde(default = "default_static_mount")]
    pub mount: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_header_bytes() -> usize {
    4096
}

fn default_max_body_bytes() -> usize {
    65536
}

fn default_read_timeout_secs() -> u64 {
    10
}

fn default_static_mount() -> String {
    "/static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: default_max_header_bytes(),
            max_body_bytes: default_max_body_bytes(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl Limits {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Config {
    /// Loads configuration from the file named by the `CONFIG` env var
    /// (default `config.yaml`). A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_yaml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
