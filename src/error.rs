//! Error kinds raised while regenerating editor settings

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A required input (source settings or template) does not exist
    #[error("Could not find the {what}: {}", path.display())]
    FileNotFound { what: &'static str, path: PathBuf },

    /// The source document has no `"<key>": [...]` list
    #[error("Settings document has no \"{key}\" list")]
    MissingField { key: String },

    #[error("Failed to read: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Failed to encode JSON value")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings key pattern")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
