//! Moorage - Deployment and management CLI for self-hosted Lantern
//! instances.
//!
//! Moorage records every Lantern instance it manages in a global
//! registry, and its advisory layer inspects the runtime, the instance
//! set, and each instance's database configuration to surface
//! deprecation warnings before they become outages.
//!
//! # Modules
//!
//! - [`checks`] - Environment and deprecation diagnostics
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Instance configuration access and environments
//! - [`error`] - Error types and result aliases
//! - [`extension`] - Database service integrations
//! - [`instance`] - Managed instances and the global registry
//! - [`ui`] - Terminal output, themes, and warning banners

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod instance;
pub mod ui;

pub use error::{MoorageError, Result};
