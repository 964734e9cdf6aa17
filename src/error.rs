//! Error types for the documentation cache generator
//!
//! All modules use `DocCacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cache generator operations
pub type DocCacheResult<T> = Result<T, DocCacheError>;

/// All errors that can occur while emitting configs or reconciling the cache
#[derive(Error, Debug)]
pub enum DocCacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Cache errors
    #[error("Could not decode {path}: {source}")]
    JsonDecode {
        path: PathBuf,
        content: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top of {0}")]
    NotAnObject(PathBuf),

    #[error("Invalid source file map {path}: {reason}")]
    SourceMapInvalid { path: PathBuf, reason: String },

    #[error("Invalid plugin search path list in {path}: {reason}")]
    PluginPathsInvalid { path: PathBuf, reason: String },

    // Scanner errors
    #[error("Failed to spawn scanner {program}")]
    ScannerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Scanner {program} failed with exit code {code}")]
    ScannerFailed { program: String, code: i32 },

    #[error("Scanner {0} terminated by signal")]
    ScannerSignaled(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    User(String),
}

impl DocCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a scanner spawn error
    pub fn scanner_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ScannerSpawn {
            program: program.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ScannerSpawn { .. } => {
                Some("Pass --scanner or set GST_HOTDOC_PLUGINS_SCANNER to the scanner binary")
            }
            Self::ScannerFailed { .. } | Self::ScannerSignaled(_) => {
                Some("The scanner output above describes the failure")
            }
            Self::NotAnObject(_) => Some("Delete the file to regenerate it from a fresh scan"),
            _ => None,
        }
    }
}
