//! The global instance registry.
//!
//! Every instance created through Moorage is recorded in
//! `~/.moorage/instances.json`, keyed by name:
//!
//! ```json
//! {
//!     "blog": {"cwd": "/var/www/blog"},
//!     "docs": {"cwd": "/var/www/docs"}
//! }
//! ```
//!
//! This module only reads the registry. Creating and removing instances
//! is handled by the install/uninstall flows, not by the advisory
//! surface.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MoorageError, Result};
use crate::instance::Instance;

/// File under the registry root listing known instances.
const REGISTRY_FILE: &str = "instances.json";

/// Directory under the home directory holding global Moorage state.
const GLOBAL_DIR: &str = ".moorage";

/// One registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Directory the instance lives in.
    pub cwd: PathBuf,
}

/// Source of known instances.
///
/// The advisory checks depend on this trait rather than on the concrete
/// registry so tests can substitute a fixed instance set.
pub trait InstanceRegistry: Sync {
    /// All recorded instances, running or not.
    fn all_instances(&self) -> Result<Vec<Instance>>;
}

/// Registry backed by the global state directory.
#[derive(Debug)]
pub struct GlobalRegistry {
    root: PathBuf,
}

impl GlobalRegistry {
    /// Open the registry under the user's home directory.
    pub fn open() -> Result<Self> {
        let home = dirs::home_dir().ok_or(MoorageError::NoHomeDir)?;
        Ok(Self::at(home.join(GLOBAL_DIR)))
    }

    /// Open a registry at a specific root (for testing).
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the registry file.
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, RegistryEntry>> {
        let path = self.registry_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            // No registry yet means no instances, not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| MoorageError::RegistryParseError {
            path,
            message: e.to_string(),
        })
    }
}

impl InstanceRegistry for GlobalRegistry {
    fn all_instances(&self) -> Result<Vec<Instance>> {
        let entries = self.read_entries()?;

        // BTreeMap keys keep the listing deterministic.
        let mut instances = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            if !entry.cwd.is_dir() {
                debug!(instance = %name, cwd = %entry.cwd.display(), "skipping stale registry entry");
                continue;
            }
            instances.push(Instance::load(&name, &entry.cwd));
        }
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    fn registry_with(temp: &TempDir, contents: &str) -> GlobalRegistry {
        let root = temp.path().join(GLOBAL_DIR);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(REGISTRY_FILE), contents).unwrap();
        GlobalRegistry::at(root)
    }

    #[test]
    fn missing_registry_yields_no_instances() {
        let temp = TempDir::new().unwrap();
        let registry = GlobalRegistry::at(temp.path().join(GLOBAL_DIR));
        assert!(registry.all_instances().unwrap().is_empty());
    }

    #[test]
    fn malformed_registry_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let registry = registry_with(&temp, "{oops");

        let err = registry.all_instances().unwrap_err();
        assert!(matches!(err, MoorageError::RegistryParseError { .. }));
    }

    #[test]
    fn loads_instances_with_versions() {
        let temp = TempDir::new().unwrap();
        let blog_dir = temp.path().join("blog");
        fs::create_dir_all(&blog_dir).unwrap();
        fs::write(
            blog_dir.join(".moorage"),
            r#"{"active-version": "5.1.0"}"#,
        )
        .unwrap();

        let registry = registry_with(
            &temp,
            &format!(r#"{{"blog": {{"cwd": {:?}}}}}"#, blog_dir),
        );

        let instances = registry.all_instances().unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "blog");
        assert_eq!(instances[0].version, Some(Version::new(5, 1, 0)));
    }

    #[test]
    fn skips_entries_with_missing_directories() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone");
        let registry = registry_with(
            &temp,
            &format!(r#"{{"gone": {{"cwd": {:?}}}}}"#, gone),
        );

        assert!(registry.all_instances().unwrap().is_empty());
    }

    #[test]
    fn instances_are_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();

        let registry = registry_with(
            &temp,
            &format!(
                r#"{{"zeta": {{"cwd": {:?}}}, "alpha": {{"cwd": {:?}}}}}"#,
                b, a
            ),
        );

        let names: Vec<String> = registry
            .all_instances()
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
