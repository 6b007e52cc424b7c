//! Error types for the settings crate.
//!
//! Covers reading, writing and validating configuration files.

use nozzlecal_core::GenerationError;
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file has an extension other than `.json` or `.toml`.
    #[error("Unsupported config format '{0}': config file must be .json or .toml")]
    UnsupportedFormat(String),

    /// The configuration directory could not be determined.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// The printer or pattern configuration failed validation.
    #[error("Config error: {0}")]
    Invalid(#[from] GenerationError),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
