use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use signview_flow::ReviewSettings;
use thiserror::Error;
use tokio::fs::{read_to_string, try_exists};

use crate::Cli;

pub const CONFIG_FILE_NAME: &str = "signview.toml";

/// Log filter when neither the CLI nor the config file sets one.
pub const DEFAULT_LOG: &str = "error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("signview config not found at: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Which review host to simulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum HostKind {
    /// Button device: one step at a time, signer pages spliced in.
    #[default]
    Step,
    /// Touch device: pages fetched by absolute index.
    Index,
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostKind::Step => write!(f, "step"),
            HostKind::Index => write!(f, "index"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigToml {
    pub log: Option<String>,
    pub scripts_allowed: Option<bool>,
    pub host: Option<HostKind>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log: String,
    pub settings: ReviewSettings,
    pub host: HostKind,
}

impl Config {
    /// Load from `path` (a file or a directory holding `signview.toml`).
    ///
    /// Without an explicit path the current directory is tried, and a
    /// missing file there just means defaults.
    pub async fn load(path: Option<&Path>, cli: &Cli) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let path = resolve_config_path(path);
                if !try_exists(&path).await.unwrap_or(false) {
                    return Err(ConfigError::ConfigNotFound { path });
                }
                Self::load_config(&path).await?
            }
            None => {
                let path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(CONFIG_FILE_NAME);
                if try_exists(&path).await.unwrap_or(false) {
                    Self::load_config(&path).await?
                } else {
                    ConfigToml::default()
                }
            }
        };

        Ok(Self::merge(config, cli))
    }

    fn merge(config: ConfigToml, cli: &Cli) -> Self {
        let ConfigToml {
            log,
            scripts_allowed,
            host,
        } = config;

        let log = cli.log.clone().or(log).unwrap_or(DEFAULT_LOG.into());
        let scripts_allowed = cli.allow_scripts || scripts_allowed.unwrap_or(false);

        Config {
            log,
            settings: ReviewSettings { scripts_allowed },
            host: host.unwrap_or_default(),
        }
    }

    async fn load_config(path: &Path) -> Result<ConfigToml, ConfigError> {
        let string = read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?;
        let config = toml::from_str(&string).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Ok(config)
    }
}

fn resolve_config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_owned()
    }
}
