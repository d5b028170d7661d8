//! Per-record detail fetch and persistence
//!
//! Each call is fully isolated: every failure is logged where it happens and
//! folded into the returned [`FetchOutcome`]. Nothing propagates to the
//! caller, so a bad record can never take down its siblings in the pool.

use crate::client::ApiClient;
use crate::types::{FailureKind, FetchOutcome, RecordKind};
use crate::utils::record_path;
use std::path::Path;
use std::time::Instant;

/// Fetch one record's detail payload and write it to `output_dir`.
///
/// The output directory is created if missing. The filename is derived from
/// the response title; a pre-existing file is logged and overwritten. There is
/// no retry on any failure path.
pub async fn download_record(
    client: &ApiClient,
    kind: RecordKind,
    id: &str,
    version: &str,
    output_dir: &Path,
) -> FetchOutcome {
    let started = Instant::now();

    if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
        tracing::error!(dir = %output_dir.display(), error = %e, "cannot create output directory");
        return FetchOutcome::Failed(FailureKind::Persistence);
    }

    tracing::debug!(kind = %kind, id = %id, version = %version, "requesting record detail");

    let envelope = match client.fetch_detail(id, kind, version).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(kind = %kind, id = %id, error = %e, "detail request failed");
            return FetchOutcome::Failed(FailureKind::Transport);
        }
    };

    if let Some(message) = envelope.remote_error() {
        tracing::warn!(kind = %kind, id = %id, error = %message, "record rejected by the API");
        return FetchOutcome::Failed(FailureKind::Remote);
    }

    let Some(title) = envelope.title else {
        tracing::warn!(kind = %kind, id = %id, "detail response carries no title");
        return FetchOutcome::Failed(FailureKind::Remote);
    };

    let path = record_path(output_dir, &title);
    if path.exists() {
        tracing::info!(path = %path.display(), "output file exists, overwriting");
    }

    let body = match serde_json::to_string_pretty(&envelope.data) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(kind = %kind, id = %id, error = %e, "cannot serialize payload");
            return FetchOutcome::Failed(FailureKind::Persistence);
        }
    };
    if let Err(e) = tokio::fs::write(&path, body).await {
        tracing::error!(path = %path.display(), error = %e, "failed to write record");
        return FetchOutcome::Failed(FailureKind::Persistence);
    }

    tracing::debug!(
        title = %title,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "record saved"
    );
    FetchOutcome::Saved { title, path }
}
