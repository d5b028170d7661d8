//! Pipeline coordinator
//!
//! Dispatches one detail fetch per catalog entry across a semaphore-bounded
//! worker pool and aggregates the typed outcomes over a results channel. The
//! pool exists only for the duration of a single call; there is no ambient
//! global state and no cancellation path — a run ends when every dispatched
//! fetch has completed.

use crate::catalog;
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::download_record;
use crate::types::{Catalog, CatalogEntry, FetchOutcome, RecordKind, RunSummary};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Bulk downloader for DiseaseDx records.
///
/// Cloneable; shared state is Arc-wrapped.
#[derive(Clone)]
pub struct BulkDownloader {
    client: Arc<ApiClient>,
    config: Arc<Config>,
}

impl BulkDownloader {
    /// Build a downloader from a configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    /// Fetch a fresh catalog, persist it, then download every record in it.
    pub async fn run(&self, kind: RecordKind) -> Result<RunSummary> {
        let catalog = catalog::fetch_catalog(&self.client, kind).await?;
        catalog::save_catalog(&catalog, &self.config.fetch.catalog_file).await?;
        tracing::info!(kind = %kind, entries = catalog.len(), "catalog fetched");
        Ok(self.download_catalog(&catalog).await)
    }

    /// Download every record listed in the persisted catalog file.
    ///
    /// Fails before any network traffic if the file is absent or malformed.
    pub async fn download_from_file(&self, kind: RecordKind) -> Result<RunSummary> {
        let catalog = catalog::load_catalog(&self.config.fetch.catalog_file, kind).await?;
        Ok(self.download_catalog(&catalog).await)
    }

    /// Download every record in an in-memory catalog.
    ///
    /// Submission follows catalog order; completions are unordered. At most
    /// `concurrent_fetches` fetches are in flight at once — the submission
    /// loop blocks on a pool permit, so entries are never pre-materialized
    /// into task objects. Per-item failures are isolated; this method itself
    /// cannot fail.
    pub async fn download_catalog(&self, catalog: &Catalog) -> RunSummary {
        let limit = self.config.fetch.concurrent_fetches.max(1);
        let pool = Arc::new(Semaphore::new(limit));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();

        let mut submitted = 0usize;
        for entry in catalog.entries() {
            let permit = match Arc::clone(&pool).acquire_owned().await {
                Ok(permit) => permit,
                // The pool is never closed; bail rather than spin if it ever is.
                Err(_) => break,
            };

            let client = Arc::clone(&self.client);
            let kind = catalog.kind();
            let id = entry.id.clone();
            let version = self.resolve_version(entry);
            let output_dir = self.config.fetch.output_dir.clone();
            let outcome_tx = outcome_tx.clone();

            submitted += 1;
            tokio::spawn(async move {
                let _permit = permit;
                let outcome = download_record(&client, kind, &id, &version, &output_dir).await;
                outcome_tx.send(outcome).ok();
            });
        }
        drop(outcome_tx);

        let mut summary = RunSummary {
            submitted,
            ..Default::default()
        };
        // The channel closes once the last worker drops its sender.
        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                FetchOutcome::Saved { .. } => summary.saved += 1,
                FetchOutcome::Failed(_) => summary.failed += 1,
            }
        }

        tracing::info!(
            kind = %catalog.kind(),
            processed = summary.processed(),
            saved = summary.saved,
            failed = summary.failed,
            "run complete"
        );
        summary
    }

    /// Version sent for one entry: the run-wide override wins, then the
    /// entry's own version, then the configured default.
    fn resolve_version(&self, entry: &CatalogEntry) -> String {
        if let Some(version) = &self.config.fetch.version_override {
            return version.clone();
        }
        if !entry.version.is_empty() {
            return entry.version.clone();
        }
        self.config.fetch.default_version.clone()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, FetchConfig};
    use crate::error::Error;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn downloader_for(server: &MockServer, temp: &TempDir, concurrency: usize) -> BulkDownloader {
        let config = Config {
            api: ApiConfig {
                base_url: server.uri(),
                locale: "zh".to_string(),
            },
            fetch: FetchConfig {
                catalog_file: temp.path().join("catalog.json"),
                output_dir: temp.path().join("records"),
                concurrent_fetches: concurrency,
                ..Default::default()
            },
        };
        BulkDownloader::new(config).unwrap()
    }

    fn entry(id: &str, version: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            version: version.to_string(),
        }
    }

    async fn mount_detail(server: &MockServer, id: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(url_path("/api/v1/open/search/detail"))
            .and(query_param("id", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn one_failing_entry_does_not_stop_the_others() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            "D1",
            json!({"error": "", "title": "Asthma", "data": {"k": 1}}),
        )
        .await;
        mount_detail(
            &server,
            "D2",
            json!({"error": "not found", "title": "", "data": {}}),
        )
        .await;
        mount_detail(
            &server,
            "D3",
            json!({"error": "", "title": "Gout", "data": {"k": 3}}),
        )
        .await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 2);

        let catalog = Catalog::new(
            RecordKind::Disease,
            vec![entry("D1", "37"), entry("D2", "37"), entry("D3", "37")],
        );
        let summary = downloader.download_catalog(&catalog).await;

        assert_eq!(summary.submitted, 3);
        assert_eq!(summary.processed(), 3);
        assert_eq!(summary.saved, 2);
        assert_eq!(summary.failed, 1);
        let files = std::fs::read_dir(temp.path().join("records")).unwrap().count();
        assert_eq!(files, 2);
    }

    #[tokio::test]
    async fn missing_catalog_file_fails_before_any_network_call() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 2);

        let result = downloader.download_from_file(RecordKind::Disease).await;

        assert!(matches!(result, Err(Error::CatalogFormat(_))));
        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty(), "no network call may precede catalog load");
    }

    #[tokio::test]
    async fn download_from_file_uses_the_persisted_catalog() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            "G1",
            json!({"error": "", "title": "BRCA1", "data": {"sym": "BRCA1"}}),
        )
        .await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 2);
        std::fs::write(
            temp.path().join("catalog.json"),
            r#"[{"id": "G1", "version": "38"}]"#,
        )
        .unwrap();

        let summary = downloader.download_from_file(RecordKind::Gene).await.unwrap();

        assert_eq!(summary.saved, 1);
        assert!(temp.path().join("records/BRCA1.json").exists());
    }

    #[tokio::test]
    async fn version_override_replaces_entry_versions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/api/v1/open/search/detail"))
            .and(query_param("id", "G1"))
            .and(query_param("version", "55"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "",
                "title": "TP53",
                "data": {}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();

        let config = Config {
            api: ApiConfig {
                base_url: server.uri(),
                locale: "zh".to_string(),
            },
            fetch: FetchConfig {
                catalog_file: temp.path().join("catalog.json"),
                output_dir: temp.path().join("records"),
                concurrent_fetches: 1,
                version_override: Some("55".to_string()),
                ..Default::default()
            },
        };
        let downloader = BulkDownloader::new(config).unwrap();

        let catalog = Catalog::new(RecordKind::Gene, vec![entry("G1", "38")]);
        let summary = downloader.download_catalog(&catalog).await;

        assert_eq!(summary.saved, 1);
    }

    #[tokio::test]
    async fn entry_without_version_falls_back_to_the_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/api/v1/open/search/detail"))
            .and(query_param("version", "37"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "",
                "title": "EGFR",
                "data": {}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 1);

        let catalog = Catalog::new(RecordKind::Gene, vec![entry("G2", "")]);
        downloader.download_catalog(&catalog).await;
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped_to_one() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            "D1",
            json!({"error": "", "title": "Flu", "data": {}}),
        )
        .await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 0);

        let catalog = Catalog::new(RecordKind::Disease, vec![entry("D1", "37")]);
        let summary = downloader.download_catalog(&catalog).await;

        assert_eq!(summary.saved, 1);
    }

    #[tokio::test]
    async fn empty_catalog_completes_with_zero_counts() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let downloader = downloader_for(&server, &temp, 3);

        let summary = downloader
            .download_catalog(&Catalog::new(RecordKind::Disease, Vec::new()))
            .await;

        assert_eq!(summary, RunSummary::default());
    }
}
