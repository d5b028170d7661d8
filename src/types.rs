//! Core types for diseasedx-dl

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// The two record kinds served by the API.
///
/// Both share the same detail endpoint; they differ only in request parameters
/// and in how their list endpoint is paginated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Disease records; the list endpoint returns everything in one request
    Disease,
    /// Gene records; the list endpoint is paginated by initial letter A-Z
    Gene,
}

impl RecordKind {
    /// The `type` value used in API query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Disease => "disease",
            RecordKind::Gene => "gene",
        }
    }

    /// Whether the list endpoint is paginated by initial letter
    pub fn paginated_list(&self) -> bool {
        matches!(self, RecordKind::Gene)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetchable record stub from the catalog. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Record identifier, passed through to the detail endpoint verbatim
    pub id: String,
    /// Record version carried by the listing
    #[serde(default)]
    pub version: String,
}

/// The full list of fetchable stubs for one record kind, in API order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    kind: RecordKind,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from already-fetched entries
    pub fn new(kind: RecordKind, entries: Vec<CatalogEntry>) -> Self {
        Self { kind, entries }
    }

    /// The record kind this catalog lists
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Entries in the order the API returned them
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Envelope returned by the list endpoints
#[derive(Clone, Debug, Deserialize)]
pub struct ListEnvelope {
    /// API error field; any truthy value marks the response as failed
    #[serde(default)]
    pub error: Value,
    /// Entry stubs carried by a successful response
    #[serde(default)]
    pub data: Vec<CatalogEntry>,
}

impl ListEnvelope {
    /// The remote error message, if the `error` field is truthy
    pub fn remote_error(&self) -> Option<String> {
        truthy_error(&self.error)
    }
}

/// Envelope returned by the detail endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct DetailEnvelope {
    /// API error field; any truthy value marks the response as failed
    #[serde(default)]
    pub error: Value,
    /// Record display title, used to derive the output filename
    #[serde(default)]
    pub title: Option<String>,
    /// The payload persisted to disk on success
    #[serde(default)]
    pub data: Value,
}

impl DetailEnvelope {
    /// The remote error message, if the `error` field is truthy
    pub fn remote_error(&self) -> Option<String> {
        truthy_error(&self.error)
    }
}

/// JavaScript-style truthiness for the API's `error` field: `null`, `false`,
/// `0`, and `""` all mean "no error".
fn truthy_error(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => b.then(|| "true".to_string()),
        Value::String(s) => (!s.is_empty()).then(|| s.clone()),
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Why a single record fetch failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network failure or a response body that was not valid JSON
    Transport,
    /// The API answered with an error field set, or an unusable payload
    Remote,
    /// The output file could not be written
    Persistence,
}

/// Outcome of one record fetch.
///
/// Failures carry only their kind; the details were already logged at the
/// failure site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The record payload was written to `path`
    Saved {
        /// The record's display title
        title: String,
        /// Where the payload landed
        path: PathBuf,
    },
    /// The fetch failed; no file was written
    Failed(FailureKind),
}

/// Aggregated result of one coordinator run.
///
/// `submitted` counts dispatched fetches and is the number a run reports as
/// processed; `saved` and `failed` break down how the dispatched fetches
/// actually ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Fetch tasks dispatched to the worker pool
    pub submitted: usize,
    /// Records written to disk
    pub saved: usize,
    /// Records that failed (transport, remote, or persistence)
    pub failed: usize,
}

impl RunSummary {
    /// The count a completed run reports: dispatched tasks, not successes
    pub fn processed(&self) -> usize {
        self.submitted
    }
}
