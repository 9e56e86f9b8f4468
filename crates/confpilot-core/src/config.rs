//! confpilot.toml configuration parser.
//!
//! Every field has a default matching the stock container layout, so an
//! empty file (or no file at all) yields a usable coordinator config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_COORDINATOR_LISTEN: &str = "0.0.0.0:5003";
pub const DEFAULT_SCHEMA_URL: &str = "http://schema-server:5001";
pub const DEFAULT_VALUES_URL: &str = "http://values-server:5002";
pub const DEFAULT_ORACLE_URL: &str = "http://ollama:11434/api/generate";
pub const DEFAULT_MODEL: &str = "mistral";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub listen: String,
    pub schemas: SourceConfig,
    pub values: SourceConfig,
    pub oracle: OracleConfig,
}

/// Where schema or values documents come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceConfig {
    /// A store service reachable over HTTP (`GET {url}/{app}`).
    Url { url: String },
    /// A local directory read in-process.
    Dir { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub url: String,
    pub model: String,
    /// Context window requested from the model.
    pub num_ctx: u32,
    /// Completion length limit; `-1` means unbounded.
    pub num_predict: i32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_COORDINATOR_LISTEN.to_string(),
            schemas: SourceConfig::Url {
                url: DEFAULT_SCHEMA_URL.to_string(),
            },
            values: SourceConfig::Url {
                url: DEFAULT_VALUES_URL.to_string(),
            },
            oracle: OracleConfig::default(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORACLE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            num_ctx: 16384,
            num_predict: -1,
        }
    }
}

impl CoordinatorConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CoordinatorConfig = toml::from_str(&content)?;
        validate_listen(&config.listen)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Check that a listen address has the `host:port` shape.
pub fn validate_listen(listen: &str) -> anyhow::Result<()> {
    let Some((host, port)) = listen.rsplit_once(':') else {
        anyhow::bail!("listen address must be in format host:port (e.g., 127.0.0.1:8000), got `{listen}`");
    };
    if host.is_empty() {
        anyhow::bail!("listen address `{listen}` has an empty host");
    }
    if port.parse::<u16>().is_err() {
        anyhow::bail!("listen address `{listen}` has an invalid port `{port}`");
    }
    Ok(())
}
