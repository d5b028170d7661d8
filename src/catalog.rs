//! Catalog retrieval and on-disk persistence
//!
//! Gene catalogs are assembled from 26 sequential per-letter list requests;
//! disease catalogs come back in a single request. A letter page whose
//! envelope carries an error is logged and skipped without dropping the other
//! letters' entries. On disk, disease catalogs keep the wrapping `{"data":
//! [...]}` object while gene catalogs are a bare array; the loader accepts
//! either shape.

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::types::{Catalog, CatalogEntry, RecordKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk catalog document, in either of the two accepted shapes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { data: Vec<CatalogEntry> },
    Bare(Vec<CatalogEntry>),
}

/// Fetch the full catalog for `kind` from the API.
///
/// Paginated kinds issue one request per uppercase letter, sequentially, and
/// merge the pages in letter order. Transport failures propagate; a rejected
/// page (truthy `error`) only loses that page.
pub async fn fetch_catalog(client: &ApiClient, kind: RecordKind) -> Result<Catalog> {
    let mut entries = Vec::new();

    if kind.paginated_list() {
        for letter in 'A'..='Z' {
            let envelope = client.fetch_list(kind, Some(letter)).await?;
            match envelope.remote_error() {
                Some(message) => {
                    tracing::warn!(kind = %kind, letter = %letter, error = %message, "list page rejected, skipping letter");
                }
                None => entries.extend(envelope.data),
            }
        }
    } else {
        let envelope = client.fetch_list(kind, None).await?;
        match envelope.remote_error() {
            Some(message) => {
                tracing::warn!(kind = %kind, error = %message, "list request rejected");
            }
            None => entries = envelope.data,
        }
    }

    Ok(Catalog::new(kind, entries))
}

/// Serialize `catalog` to `path`, overwriting any previous file.
pub async fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let document = match catalog.kind() {
        RecordKind::Disease => CatalogFile::Wrapped {
            data: catalog.entries().to_vec(),
        },
        RecordKind::Gene => CatalogFile::Bare(catalog.entries().to_vec()),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_vec(&document)?)
        .await
        .map_err(|source| Error::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// Load a previously saved catalog.
///
/// An absent, unreadable, or unparseable file is a
/// [`CatalogFormat`](Error::CatalogFormat) error, fatal to the run.
pub async fn load_catalog(path: &Path, kind: RecordKind) -> Result<Catalog> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        Error::CatalogFormat(format!("cannot read {}: {e}", path.display()))
    })?;
    let document: CatalogFile = serde_json::from_slice(&raw).map_err(|e| {
        Error::CatalogFormat(format!("cannot parse {}: {e}", path.display()))
    })?;

    let entries = match document {
        CatalogFile::Wrapped { data } => data,
        CatalogFile::Bare(entries) => entries,
    };
    Ok(Catalog::new(kind, entries))
}
