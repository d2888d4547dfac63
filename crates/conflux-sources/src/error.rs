//! Source adapter error types.

use thiserror::Error;

/// Errors that can occur while loading an upstream source.
///
/// These never cross the orchestration boundary: a failing source is
/// logged and contributes nothing this run, without stopping the others.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the upstream.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an upstream YAML feed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to parse a JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a local data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Upstream data did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}
