//! Error types for pipeline runs.

use std::path::PathBuf;

use pageroute_core::ScanError;
use thiserror::Error;

/// Errors that can occur while generating routes.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The page root is missing.
    #[error("Invalid page root: {path}")]
    InvalidPageRoot { path: PathBuf },

    /// Scanning the page root failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("Failed to parse config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Writing the generated output failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file watcher could not be set up.
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}
