//! # diseasedx-dl
//!
//! Bulk downloader for the DiseaseDx open search API.
//!
//! The crate retrieves the full catalog of disease or gene record stubs, then
//! fans out parallel detail fetches bounded by a configurable concurrency
//! limit, persisting each record as one pretty-printed JSON file named from
//! its sanitized title.
//!
//! ## Design Philosophy
//!
//! - **Per-item isolation** - one failed record never affects its siblings
//! - **Sensible defaults** - mirrors the conventional `data/` layout out of the box
//! - **Library-first** - the CLI binary is a thin shell over this crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use diseasedx_dl::{BulkDownloader, Config, RecordKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::for_kind(RecordKind::Disease);
//!     let downloader = BulkDownloader::new(config)?;
//!
//!     // Fetch the catalog, persist it, then download every record in it.
//!     let summary = downloader.run(RecordKind::Disease).await?;
//!     println!("processed {} records", summary.processed());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Catalog retrieval and on-disk persistence
pub mod catalog;
/// HTTP client for the remote search API
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Per-record detail fetch and persistence
pub mod fetch;
/// Pipeline coordinator
pub mod pipeline;
/// Core types and outcomes
pub mod types;
/// Filename helpers
pub mod utils;

// Re-export commonly used types
pub use catalog::{fetch_catalog, load_catalog, save_catalog};
pub use client::ApiClient;
pub use config::{ApiConfig, Config, FetchConfig};
pub use error::{Error, Result};
pub use fetch::download_record;
pub use pipeline::BulkDownloader;
pub use types::{
    Catalog, CatalogEntry, DetailEnvelope, FailureKind, FetchOutcome, ListEnvelope, RecordKind,
    RunSummary,
};
pub use utils::{record_path, sanitize_title};
