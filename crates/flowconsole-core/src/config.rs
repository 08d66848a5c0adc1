use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::error::ConsoleError;
use super::state::ConsoleRoute;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleConfig,
    pub journal: JournalConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Load nested process groups when refreshing the summary.
    pub recursive_summary: bool,
    pub initial_route: String,
    /// Identity reported by the simulated backend.
    pub identity: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            recursive_summary: true,
            initial_route: "/summary/processors".to_string(),
            identity: "admin".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    pub enabled: bool,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConsoleError> {
        toml::from_str(raw).map_err(|source| ConsoleError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, path)
    }

    pub fn initial_route(&self) -> Result<ConsoleRoute, ConsoleError> {
        ConsoleRoute::parse(&self.console.initial_route)
            .ok_or_else(|| ConsoleError::UnknownRoute(self.console.initial_route.clone()))
    }
}
