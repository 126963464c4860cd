//! Error types
//!
//! Only startup and configuration can fail; the simulation itself has no
//! error paths.

use thiserror::Error;

/// Failure to bring up the drawing surface. Fatal: the frame loop is not
/// started.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("canvas element could not be created")]
    NoCanvas,

    #[error("2D drawing context is not available")]
    MissingContext,
}

/// Failure to load a [`GameConfig`](crate::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
