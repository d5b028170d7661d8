//! Error types for diseasedx-dl
//!
//! Per-record failures (transport, remote rejection, write failure) are handled
//! and logged inside the fetch path and never surface as `Err` — see
//! [`crate::fetch::download_record`]. The variants here cover the places where
//! an error is allowed to propagate: client construction, catalog retrieval,
//! and catalog file handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for diseasedx-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for diseasedx-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP-level failure reaching the API, including response
    /// bodies that could not be decoded as JSON
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Filesystem failure while writing an output file
    #[error("failed to write {path}: {source}")]
    Persistence {
        /// The output path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog file absent, unreadable, or not one of the two accepted shapes.
    /// Fatal to a run — no per-item isolation is possible before a catalog
    /// exists.
    #[error("catalog format error: {0}")]
    CatalogFormat(String),

    /// Invalid base URL or endpoint construction failure
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
