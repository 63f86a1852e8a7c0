//! Process configuration.
//!
//! Read once from the environment at startup:
//!
//! - `SOULREGISTRY_PORT` — listen port (default 4000)
//! - `SOULREGISTRY_DATA_DIR` — where the record log lives (default ./data)
//!
//! CLI flags may override either value. No other environment-dependent
//! behavior exists.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the listen port
pub const PORT_VAR: &str = "SOULREGISTRY_PORT";
/// Environment variable naming the data directory
pub const DATA_DIR_VAR: &str = "SOULREGISTRY_DATA_DIR";

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration errors are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SOULREGISTRY_PORT value '{value}': expected a port number")]
    InvalidPort { value: String },
}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(PORT_VAR) {
            Ok(value) => parse_port(value)?,
            Err(_) => DEFAULT_PORT,
        };

        let data_dir = env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self { port, data_dir })
    }
}

fn parse_port(value: String) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidPort { value })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}
