//! # Driver Error Types

use std::path::PathBuf;

use strata_procedural::GenerationError;
use thiserror::Error;

/// Errors raised while loading or baking a world settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or does not match the schema.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The placement prefab is not registered.
    #[error("unknown prefab `{name}` (registered: {known})")]
    UnknownPrefab {
        /// Name from the settings file.
        name: String,
        /// Comma-separated registered names.
        known: String,
    },

    /// A chunk axis or count does not fit the generator's integer types.
    #[error("`{field}` is out of range: {value}")]
    OutOfRange {
        /// Settings key.
        field: &'static str,
        /// Offending value.
        value: i64,
    },
}

/// Top-level error of the generate driver.
#[derive(Error, Debug)]
pub enum AppError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Generation failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Logging could not be installed.
    #[error("failed to install logging: {0}")]
    Logging(String),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type for the driver.
pub type AppResult<T> = Result<T, AppError>;
