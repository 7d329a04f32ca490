use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CONFIG_DIR: &str = ".config/tvsourceswitch";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found (looked for {0})")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Settings for one switching run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Name of the media input source to switch to
    pub source: String,
    /// Bearer credential for the SmartThings API
    pub smartthings_token: String,
    /// Identifier of the TV device to control
    pub smartthings_device_id: String,
}

impl Config {
    /// Load configuration from `path` if given, otherwise from the first
    /// existing candidate location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let candidates = Self::candidates();
                let found = candidates.iter().find(|p| p.is_file()).ok_or_else(|| {
                    let searched = candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    ConfigError::NotFound(searched)
                })?;
                Self::from_file(found)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search order: `~/.config/tvsourceswitch/config.yaml`, then `./config.yaml`
    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
        }
        candidates.push(PathBuf::from(CONFIG_FILE));
        candidates
    }
}
