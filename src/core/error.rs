//! Error types for the core

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures that can occur while setting up the console.
///
/// Commands on a running console never fail; these only cover startup.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Failed to read settings from {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
