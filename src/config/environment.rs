//! Runtime environment classification.
//!
//! Lantern instances run either in production or in development, and
//! several behaviors (config file selection, database support rules)
//! depend on which one is in effect.

use std::fmt;
use std::str::FromStr;

/// The environment an instance (or the whole system) runs in.
///
/// Defaults to production, matching the hosting-oriented posture of the
/// tool: an unset environment on a server is almost always production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live deployment.
    #[default]
    Production,
    /// Local development.
    Development,
}

impl Environment {
    /// Detect the system environment from `MOORAGE_ENV`, then `NODE_ENV`.
    ///
    /// Unknown or unset values fall back to production.
    pub fn detect() -> Self {
        Self::detect_with_env(|key| std::env::var(key))
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        for key in ["MOORAGE_ENV", "NODE_ENV"] {
            if let Ok(value) = env_fn(key) {
                if let Ok(env) = value.parse() {
                    return env;
                }
            }
        }
        Self::Production
    }

    /// Name of the config file for this environment, e.g.
    /// `config.production.json`.
    pub fn config_file_name(&self) -> String {
        format!("config.{}.json", self)
    }

    /// Whether this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(format!("unknown environment: {}", s)),
        }
    }
}
