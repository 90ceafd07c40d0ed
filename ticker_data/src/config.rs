//! Runtime configuration.
//!
//! Settings come from an optional TOML file (e.g. `ticker_data.toml`), then
//! environment overrides, then command-line flags:
//!
//! ```toml
//! data_dir = "./data"
//! news_count = 8
//! user_agent = "Mozilla/5.0 ..."
//! ```

use std::{fs, path::{Path, PathBuf}};

use log::error;
use serde::Deserialize;
use shared_utils::env::optional_env_var;

use crate::errors::Error;

pub const DATA_DIR_ENV: &str = "TICKER_DATA_DIR";
pub const USER_AGENT_ENV: &str = "TICKER_DATA_USER_AGENT";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one `<TICKER>.json` per cached ticker.
    pub data_dir: PathBuf,
    /// User agent sent to the data provider.
    pub user_agent: String,
    /// How many headlines to request on refresh.
    pub news_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            news_count: 8,
        }
    }
}

impl Config {
    /// Reads and parses a TOML config file. Keys left out take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read config file {}: {e}", path.display());
            e
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Applies `TICKER_DATA_DIR` and `TICKER_DATA_USER_AGENT` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = optional_env_var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(agent) = optional_env_var(USER_AGENT_ENV) {
            self.user_agent = agent;
        }
        self
    }
}
