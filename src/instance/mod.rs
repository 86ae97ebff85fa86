//! Managed Lantern instances.
//!
//! An instance is one deployment of Lantern: a directory containing the
//! application, its per-environment config files, and a `.moorage`
//! metadata file recording the active version.

pub mod registry;

pub use registry::{GlobalRegistry, InstanceRegistry};

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::Deserialize;
use tracing::debug;

use crate::config::{Environment, InstanceConfig};
use crate::error::Result;

/// File inside an instance directory holding Moorage metadata.
const METADATA_FILE: &str = ".moorage";

/// Per-instance metadata written at install/update time.
#[derive(Debug, Deserialize)]
struct InstanceMetadata {
    #[serde(rename = "active-version")]
    active_version: Option<String>,
}

/// One managed deployment of Lantern.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Registered name (registry key).
    pub name: String,
    /// Instance directory.
    pub dir: PathBuf,
    /// Active application version, if known and parsable.
    pub version: Option<Version>,
}

impl Instance {
    /// Build an instance from its registered name and directory, reading
    /// the active version from the metadata file.
    pub fn load(name: &str, dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            version: read_active_version(dir),
        }
    }

    /// Resolve the effective environment for this instance.
    ///
    /// If the system runs in production but the instance only has a
    /// development config file, the instance is treated as development.
    pub fn check_environment(&self, system_env: Environment) -> Environment {
        if system_env.is_production()
            && !InstanceConfig::exists(&self.dir, Environment::Production)
            && InstanceConfig::exists(&self.dir, Environment::Development)
        {
            debug!(
                instance = %self.name,
                "production config missing, falling back to development"
            );
            return Environment::Development;
        }
        system_env
    }

    /// Load this instance's config for the given environment.
    pub fn config(&self, env: Environment) -> Result<InstanceConfig> {
        InstanceConfig::load(&self.dir, env)
    }
}

/// Read the active version from an instance's metadata file.
///
/// Missing files, unreadable JSON, and malformed version strings all
/// yield `None`; an instance without a known version is still listed.
fn read_active_version(dir: &Path) -> Option<Version> {
    let raw = fs::read_to_string(dir.join(METADATA_FILE)).ok()?;
    let metadata: InstanceMetadata = match serde_json::from_str(&raw) {
        Ok(m) => m,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "unreadable instance metadata");
            return None;
        }
    };

    let value = metadata.active_version?;
    match Version::parse(value.trim()) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(dir = %dir.display(), version = %value, error = %e, "bad active version");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_metadata(dir: &Path, json: &str) {
        fs::write(dir.join(METADATA_FILE), json).unwrap();
    }

    #[test]
    fn load_reads_active_version() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), r#"{"active-version": "5.2.1"}"#);

        let instance = Instance::load("blog", temp.path());
        assert_eq!(instance.name, "blog");
        assert_eq!(instance.version, Some(Version::new(5, 2, 1)));
    }

    #[test]
    fn load_without_metadata_has_no_version() {
        let temp = TempDir::new().unwrap();
        let instance = Instance::load("blog", temp.path());
        assert!(instance.version.is_none());
    }

    #[test]
    fn load_with_malformed_version_has_no_version() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), r#"{"active-version": "five-ish"}"#);

        let instance = Instance::load("blog", temp.path());
        assert!(instance.version.is_none());
    }

    #[test]
    fn load_with_garbage_metadata_has_no_version() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), "{broken");

        let instance = Instance::load("blog", temp.path());
        assert!(instance.version.is_none());
    }

    #[test]
    fn check_environment_keeps_production_when_config_exists() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.production.json"), "{}").unwrap();

        let instance = Instance::load("blog", temp.path());
        assert_eq!(
            instance.check_environment(Environment::Production),
            Environment::Production
        );
    }

    #[test]
    fn check_environment_falls_back_to_development() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.development.json"), "{}").unwrap();

        let instance = Instance::load("blog", temp.path());
        assert_eq!(
            instance.check_environment(Environment::Production),
            Environment::Development
        );
    }

    #[test]
    fn check_environment_without_any_config_stays_production() {
        let temp = TempDir::new().unwrap();
        let instance = Instance::load("blog", temp.path());
        assert_eq!(
            instance.check_environment(Environment::Production),
            Environment::Production
        );
    }

    #[test]
    fn check_environment_in_development_never_switches() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.production.json"), "{}").unwrap();

        let instance = Instance::load("blog", temp.path());
        assert_eq!(
            instance.check_environment(Environment::Development),
            Environment::Development
        );
    }
}
