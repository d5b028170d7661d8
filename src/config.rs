//! Configuration types for diseasedx-dl

use crate::types::RecordKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote API settings
///
/// Used as a nested sub-config within [`Config`]. The base URL is overridable
/// so tests (and mirrors) can point the client elsewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the DiseaseDx API (default: "http://59.110.46.8:4000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Response language requested via the `lang` query parameter (default: "zh")
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            locale: default_locale(),
        }
    }
}

/// Fetch behavior settings (paths, concurrency, versions)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Where the catalog file is written and loaded from
    /// (default: "data/catalog.json"; see [`Config::for_kind`] for the
    /// per-kind conventional paths)
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,

    /// Directory record files are written into (default: "data/records")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum concurrent detail fetches (default: 3)
    #[serde(default = "default_concurrent_fetches")]
    pub concurrent_fetches: usize,

    /// Version used when a catalog entry carries none (default: "37")
    #[serde(default = "default_version")]
    pub default_version: String,

    /// When set, replaces the version of every entry in the run
    #[serde(default)]
    pub version_override: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            output_dir: default_output_dir(),
            concurrent_fetches: default_concurrent_fetches(),
            default_version: default_version(),
            version_override: None,
        }
    }
}

/// Main configuration for [`BulkDownloader`](crate::BulkDownloader)
///
/// Sub-config fields are flattened for serialization, so the JSON format stays
/// flat (no nesting).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(flatten)]
    pub api: ApiConfig,

    /// Fetch behavior settings
    #[serde(flatten)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Configuration preset with the conventional `data/` paths for one kind:
    /// `data/diseaselist.json` + `data/disease`, or `data/genelist.json` +
    /// `data/gene`.
    pub fn for_kind(kind: RecordKind) -> Self {
        let fetch = match kind {
            RecordKind::Disease => FetchConfig {
                catalog_file: PathBuf::from("data/diseaselist.json"),
                output_dir: PathBuf::from("data/disease"),
                ..Default::default()
            },
            RecordKind::Gene => FetchConfig {
                catalog_file: PathBuf::from("data/genelist.json"),
                output_dir: PathBuf::from("data/gene"),
                ..Default::default()
            },
        };
        Self {
            api: ApiConfig::default(),
            fetch,
        }
    }

    /// Catalog file path
    pub fn catalog_file(&self) -> &PathBuf {
        &self.fetch.catalog_file
    }

    /// Output directory
    pub fn output_dir(&self) -> &PathBuf {
        &self.fetch.output_dir
    }
}

fn default_base_url() -> String {
    "http://59.110.46.8:4000".to_string()
}

fn default_locale() -> String {
    "zh".to_string()
}

fn default_catalog_file() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/records")
}

fn default_concurrent_fetches() -> usize {
    3
}

fn default_version() -> String {
    "37".to_string()
}
