//! Database extensions.
//!
//! Extensions integrate Moorage with external services an instance
//! depends on. The advisory surface only needs one capability from
//! them: reporting the live server version of a configured database.
//! The full plugin architecture (install hooks, setup stages) lives
//! elsewhere and is intentionally not modeled here.

pub mod mysql;

pub use mysql::MysqlExtension;

use semver::Version;

use crate::config::InstanceConfig;
use crate::error::Result;

/// A database integration that can report its server's version.
pub trait DatabaseExtension: Send + Sync {
    /// Client name this extension handles (`mysql`, ...).
    fn name(&self) -> &str;

    /// Query the live server version using connection settings from the
    /// instance config.
    ///
    /// `Ok(None)` means the server was unreachable or its version could
    /// not be determined; callers must not treat that as outdated.
    fn server_version(&self, config: &InstanceConfig) -> Result<Option<Version>>;
}

/// Lookup of database extensions by client name.
pub trait ExtensionLookup: Sync {
    /// Find the extension handling `client`, if one is installed.
    fn database(&self, client: &str) -> Option<&dyn DatabaseExtension>;
}

/// The extensions bundled with Moorage.
#[derive(Debug, Default)]
pub struct BuiltinExtensions {
    mysql: MysqlExtension,
}

impl BuiltinExtensions {
    /// Create the built-in extension set.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExtensionLookup for BuiltinExtensions {
    fn database(&self, client: &str) -> Option<&dyn DatabaseExtension> {
        match client {
            "mysql" => Some(&self.mysql),
            _ => None,
        }
    }
}
