//! Error types for the drill library.
//!
//! Data absence (empty filters, too few words for a quiz) is not an error and
//! never shows up here; those cases surface as `Option` or an explicit
//! unavailable state.

use std::path::PathBuf;
use thiserror::Error;

/// Failures from the word-progression engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressionError {
    /// The requested word is not in the current filtered list.
    #[error("word '{id}' is not in the current word list")]
    WordNotFound { id: String },
}

/// Failures from a progress store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create the data directory.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a record.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a record.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a record.
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded as JSON.
    #[error("failed to encode record '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
