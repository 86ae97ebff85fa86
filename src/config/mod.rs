//! Instance configuration access.
//!
//! Each Lantern instance keeps one JSON config file per environment in
//! its directory (`config.production.json`, `config.development.json`).
//! This module loads those files and offers dotted-path lookups such as
//! `database.client` or `database.connection.host`. It deliberately does
//! not model the full configuration schema; the advisory checks only
//! need a handful of keys.

pub mod environment;

pub use environment::Environment;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{MoorageError, Result};

/// Read-only accessor over an instance's environment config file.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    path: PathBuf,
    values: Value,
}

impl InstanceConfig {
    /// Load the config file for `env` from an instance directory.
    pub fn load(instance_dir: &Path, env: Environment) -> Result<Self> {
        let path = instance_dir.join(env.config_file_name());
        Self::load_file(&path)
    }

    /// Load a config file by path.
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|_| MoorageError::ConfigNotFound {
            path: path.to_path_buf(),
        })?;

        let values: Value =
            serde_json::from_str(&raw).map_err(|e| MoorageError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Check whether a config file exists for `env` in an instance directory.
    pub fn exists(instance_dir: &Path, env: Environment) -> bool {
        instance_dir.join(env.config_file_name()).is_file()
    }

    /// Path this config was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a value by dotted path, e.g. `database.connection.host`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current = &self.values;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Look up a string value by dotted path.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up an integer value by dotted path.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// The configured database client (`mysql`, `sqlite3`, ...), if any.
    pub fn database_client(&self) -> Option<&str> {
        self.get_str("database.client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, env: Environment, json: &str) {
        fs::write(dir.join(env.config_file_name()), json).unwrap();
    }

    #[test]
    fn load_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = InstanceConfig::load(temp.path(), Environment::Production).unwrap_err();
        assert!(matches!(err, MoorageError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), Environment::Production, "{not json");

        let err = InstanceConfig::load(temp.path(), Environment::Production).unwrap_err();
        assert!(matches!(err, MoorageError::ConfigParseError { .. }));
    }

    #[test]
    fn get_resolves_dotted_paths() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            Environment::Production,
            r#"{"database": {"client": "mysql", "connection": {"host": "127.0.0.1", "port": 3306}}}"#,
        );

        let config = InstanceConfig::load(temp.path(), Environment::Production).unwrap();
        assert_eq!(config.get_str("database.client"), Some("mysql"));
        assert_eq!(config.get_str("database.connection.host"), Some("127.0.0.1"));
        assert_eq!(config.get_u64("database.connection.port"), Some(3306));
        assert_eq!(config.get_str("database.connection.user"), None);
        assert_eq!(config.get("server.port"), None);
    }

    #[test]
    fn database_client_shortcut() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            Environment::Development,
            r#"{"database": {"client": "sqlite3"}}"#,
        );

        let config = InstanceConfig::load(temp.path(), Environment::Development).unwrap();
        assert_eq!(config.database_client(), Some("sqlite3"));
    }

    #[test]
    fn database_client_absent() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), Environment::Development, r#"{"url": "http://localhost"}"#);

        let config = InstanceConfig::load(temp.path(), Environment::Development).unwrap();
        assert_eq!(config.database_client(), None);
    }

    #[test]
    fn exists_checks_per_environment_files() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), Environment::Development, "{}");

        assert!(InstanceConfig::exists(temp.path(), Environment::Development));
        assert!(!InstanceConfig::exists(temp.path(), Environment::Production));
    }
}
