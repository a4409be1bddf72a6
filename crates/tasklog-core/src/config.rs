//! Configuration loaded from the environment.

use std::path::PathBuf;

use thiserror::Error;

pub const ENV_STORAGE_PATH: &str = "TASKLOG_STORAGE_PATH";
pub const ENV_EXPORT_DIR: &str = "TASKLOG_EXPORT_DIR";

pub const DEFAULT_STORAGE_PATH: &str = "taskData.json";
pub const DEFAULT_EXPORT_DIR: &str = ".";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is set but empty")]
    Empty { name: &'static str },

    #[error("{name} is not valid unicode")]
    NotUnicode { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File backing the storage slot.
    pub storage_path: PathBuf,

    /// Directory that receives `tasks.xlsx`.
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Same as [`Config::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, std::env::VarError>,
    {
        let read = |name: &'static str, default: &str| -> Result<PathBuf, ConfigError> {
            match lookup(name) {
                Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
                Ok(value) => Ok(PathBuf::from(value)),
                Err(std::env::VarError::NotPresent) => Ok(PathBuf::from(default)),
                Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
            }
        };

        Ok(Self {
            storage_path: read(ENV_STORAGE_PATH, DEFAULT_STORAGE_PATH)?,
            export_dir: read(ENV_EXPORT_DIR, DEFAULT_EXPORT_DIR)?,
        })
    }
}
