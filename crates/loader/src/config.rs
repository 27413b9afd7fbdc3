//! Loader configuration
//!
//! Read from the TOML file named by `SWOLETH_CONFIG`, or from `swoleth.toml` in the working
//! directory. Without a configuration file, all settings except the caller take their
//! default values.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use swoleth_domain::AccountID;
use uuid::Uuid;

use crate::{loader::Dispatch, log::Format};

pub const ENV_VAR: &str = "SWOLETH_CONFIG";
pub const DEFAULT_PATH: &str = "swoleth.toml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSV file with one exercise per line.
    pub input: PathBuf,
    /// JSON file holding the registry state.
    pub registry: PathBuf,
    /// Account issuing the upsert requests.
    pub caller: Option<Uuid>,
    /// Owner of a newly deployed registry. Defaults to the caller.
    pub owner: Option<Uuid>,
    pub has_header: bool,
    /// Validate all rows against a copy of the registry without persisting any change.
    pub dry_run: bool,
    pub log_level: LevelFilter,
    pub log_format: Format,
    pub dispatch: Dispatch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("resources/sample.csv"),
            registry: PathBuf::from("registry.json"),
            caller: None,
            owner: None,
            has_header: false,
            dry_run: false,
            log_level: LevelFilter::Info,
            log_format: Format::default(),
            dispatch: Dispatch::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no caller configured")]
    MissingCaller,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        match locate(std::env::var_os(ENV_VAR).map(PathBuf::from), Path::new(DEFAULT_PATH)) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn caller(&self) -> Result<AccountID, ConfigError> {
        self.caller
            .map(AccountID::from)
            .ok_or(ConfigError::MissingCaller)
    }

    #[must_use]
    pub fn owner(&self, caller: AccountID) -> AccountID {
        self.owner.map_or(caller, AccountID::from)
    }
}

/// An explicitly named file is used even if it does not exist.
fn locate(explicit: Option<PathBuf>, default: &Path) -> Option<PathBuf> {
    explicit.or_else(|| default.exists().then(|| default.to_path_buf()))
}
