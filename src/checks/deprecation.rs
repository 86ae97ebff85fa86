//! Deprecation advisories.
//!
//! Three independent conditions are checked against the runtime and the
//! registered instance set, and each produces at most one bordered
//! warning per run:
//!
//! - the Node.js runtime is older than the minimum supported version;
//! - any instance runs an application version older than the minimum
//!   maintained major;
//! - any instance has an unsupported database setup (SQLite in
//!   production, or a MySQL server whose major version is not the
//!   required one).
//!
//! Per-instance database checks fan out across scoped threads. They are
//! order-independent and share no mutable state; a failing or panicking
//! check counts as "not flagged" and never takes the other instances
//! down with it.

use std::thread;

use semver::Version;
use tracing::debug;

use crate::config::Environment;
use crate::error::Result;
use crate::extension::ExtensionLookup;
use crate::instance::{Instance, InstanceRegistry};
use crate::ui::{banner, MoorageTheme, UserInterface};

/// SQLite client name; supported in development only.
const SQLITE_CLIENT: &str = "sqlite3";

/// MySQL client name; the server major version must match the threshold.
const MYSQL_CLIENT: &str = "mysql";

/// Version thresholds the checks compare against.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Minimum supported Node.js version.
    pub runtime_min: Version,
    /// Minimum maintained Lantern version.
    pub app_min: Version,
    /// Required MySQL server major version.
    pub required_db_major: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            runtime_min: Version::new(18, 0, 0),
            app_min: Version::new(5, 0, 0),
            required_db_major: 8,
        }
    }
}

/// Which advisory fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deprecation {
    /// Outdated Node.js runtime.
    Runtime,
    /// Outdated application major version on some instance.
    App,
    /// Unsupported database version or configuration on some instance.
    Database,
}

/// The deprecation check runner.
///
/// Holds references to its collaborators so tests can substitute a
/// fixed registry and a stub extension lookup.
pub struct DeprecationChecks<'a> {
    thresholds: Thresholds,
    registry: &'a dyn InstanceRegistry,
    extensions: &'a dyn ExtensionLookup,
}

impl<'a> DeprecationChecks<'a> {
    /// Create a runner with the default thresholds.
    pub fn new(registry: &'a dyn InstanceRegistry, extensions: &'a dyn ExtensionLookup) -> Self {
        Self::with_thresholds(registry, extensions, Thresholds::default())
    }

    /// Create a runner with explicit thresholds.
    pub fn with_thresholds(
        registry: &'a dyn InstanceRegistry,
        extensions: &'a dyn ExtensionLookup,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            thresholds,
            registry,
            extensions,
        }
    }

    /// Run all checks, printing one banner per fired advisory.
    ///
    /// `runtime_version` is the detected Node.js version (`None` when
    /// unknown, which never warns). `system_env` is the environment the
    /// tool itself runs in; individual instances may resolve to
    /// development via their config files.
    pub fn run(
        &self,
        runtime_version: Option<&Version>,
        system_env: Environment,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<Deprecation>> {
        let theme = MoorageTheme::auto();
        let mut fired = Vec::new();

        if let Some(version) = runtime_version {
            if *version < self.thresholds.runtime_min {
                ui.message(&banner::runtime_deprecated(&theme, version));
                fired.push(Deprecation::Runtime);
            }
        }

        let instances = self.registry.all_instances()?;

        let outdated_app = instances
            .iter()
            .any(|i| i.version.as_ref().is_some_and(|v| *v < self.thresholds.app_min));
        if outdated_app {
            ui.message(&banner::app_deprecated(&theme));
            fired.push(Deprecation::App);
        }

        if self.any_database_unsupported(&instances, system_env) {
            ui.message(&banner::database_deprecated(&theme));
            fired.push(Deprecation::Database);
        }

        Ok(fired)
    }

    /// Fan the per-instance database checks out across scoped threads.
    fn any_database_unsupported(&self, instances: &[Instance], system_env: Environment) -> bool {
        thread::scope(|scope| {
            let handles: Vec<_> = instances
                .iter()
                .map(|instance| {
                    scope.spawn(move || self.database_unsupported(instance, system_env))
                })
                .collect();

            // A panicked check counts as not flagged.
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(false))
                .fold(false, |any, flagged| any || flagged)
        })
    }

    /// Check one instance's database setup.
    fn database_unsupported(&self, instance: &Instance, system_env: Environment) -> bool {
        let env = instance.check_environment(system_env);

        let config = match instance.config(env) {
            Ok(config) => config,
            Err(e) => {
                debug!(instance = %instance.name, error = %e, "skipping database check");
                return false;
            }
        };

        let Some(client) = config.database_client() else {
            return false;
        };

        if env.is_production() && client == SQLITE_CLIENT {
            return true;
        }

        if client == MYSQL_CLIENT {
            let Some(extension) = self.extensions.database(client) else {
                debug!(instance = %instance.name, "no mysql extension available");
                return false;
            };

            return match extension.server_version(&config) {
                Ok(Some(version)) => version.major != self.thresholds.required_db_major,
                // Unknown server version is not evidence of an outdated one.
                Ok(None) => false,
                Err(e) => {
                    debug!(instance = %instance.name, error = %e, "mysql version probe failed");
                    false
                }
            };
        }

        false
    }
}
