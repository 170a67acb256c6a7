//! Error types for the fallible edges of the crate.
//!
//! The transform itself never fails: unparseable colors, selectors without an
//! opacity suffix and unavailable triplets all degrade to a no-op. Errors only
//! come from reading a stylesheet or loading [`Options`](crate::Options).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing stylesheets or loading options.
#[derive(Debug, Error)]
pub enum Error {
    /// The stylesheet text could not be tokenized into rules.
    #[error("failed to parse stylesheet at line {line}, column {column}: {message}")]
    Parse {
        /// 1-based line of the offending token.
        line: u32,
        /// 1-based column of the offending token.
        column: u32,
        message: String,
    },

    /// YAML options could not be deserialized.
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON options could not be deserialized.
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    /// The options file extension is not one of the supported formats.
    #[error("unsupported options format '{}' (expected .yaml, .yml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Reading an options file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for opacity-fallback operations.
pub type Result<T> = std::result::Result<T, Error>;
