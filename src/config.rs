//! Configuration
//!
//! Settings read from an optional TOML file. Every field has a default, so an
//! empty or partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host name shown in the prompt.
    pub hostname: String,
    /// Where `save`/`load` keep the tree snapshot.
    pub snapshot_path: PathBuf,
    /// Where `save`/`load` keep the user table.
    pub users_path: PathBuf,
    /// Account allowed to use `sudo` besides uid 0.
    pub admin_account: String,
    /// Commands remembered per session.
    pub history_capacity: usize,
    /// Output lines kept per window; older lines are dropped first.
    pub output_capacity: usize,
    /// First line of every new window.
    pub banner: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: "terminalos".to_string(),
            snapshot_path: PathBuf::from("terminalos_fs.json"),
            users_path: PathBuf::from("terminalos_users.json"),
            admin_account: "admin".to_string(),
            history_capacity: 100,
            output_capacity: 1000,
            banner: "TerminalOS - Type 'help' for commands.".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.output_capacity, 1000);
        assert_eq!(config.admin_account, "admin");
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml("hostname = \"box\"\nhistory_capacity = 5\n", "inline").unwrap();
        assert_eq!(config.hostname, "box");
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.snapshot_path, PathBuf::from("terminalos_fs.json"));
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_toml("history_capacity = \"many\"", "inline").unwrap_err();
        assert!(err.to_string().contains("inline"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
