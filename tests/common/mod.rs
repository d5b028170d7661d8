//! Common test utilities for diseasedx-dl end-to-end tests

use diseasedx_dl::{ApiConfig, Config, FetchConfig};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a config pointing at the mock server, with catalog and output
/// locations inside `temp`.
pub fn test_config(server: &MockServer, temp: &TempDir, concurrency: usize) -> Config {
    Config {
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
    }
}

/// Mount the single-page disease list endpoint.
pub async fn mount_disease_list(server: &MockServer, entries: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/open/search/disease"))
        .and(query_param("type", "all"))
        .and(query_param("letter", "ALL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "", "data": entries})),
        )
        .mount(server)
        .await;
}

/// Mount one letter page of the gene list endpoint.
pub async fn mount_gene_letter(server: &MockServer, letter: char, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/open/search/gene"))
        .and(query_param("letter", letter.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount an empty-page fallback for every gene letter not mocked explicitly.
/// Mount this LAST — wiremock matches mocks in mount order.
pub async fn mount_gene_letter_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/open/search/gene"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "", "data": []})))
        .mount(server)
        .await;
}

/// Mount a successful detail response for one record id.
pub async fn mount_detail(server: &MockServer, id: &str, title: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/open/search/detail"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "",
            "title": title,
            "data": data
        })))
        .mount(server)
        .await;
}

/// Mount a detail response whose envelope carries a remote error.
pub async fn mount_detail_error(server: &MockServer, id: &str, message: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/open/search/detail"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": message,
            "data": {}
        })))
        .mount(server)
        .await;
}
