//! Error types for Moorage operations.
//!
//! This module defines [`MoorageError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MoorageError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `MoorageError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Moorage operations.
#[derive(Debug, Error)]
pub enum MoorageError {
    /// The global instance registry file could not be parsed.
    #[error("Failed to parse instance registry at {path}: {message}")]
    RegistryParseError { path: PathBuf, message: String },

    /// An instance configuration file was not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// An instance configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A version string could not be interpreted.
    #[error("Invalid version '{value}': {message}")]
    InvalidVersion { value: String, message: String },

    /// A requested extension is not available.
    #[error("Unknown extension: {name}")]
    UnknownExtension { name: String },

    /// An external command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Moorage operations.
pub type Result<T> = std::result::Result<T, MoorageError>;
