//! HTTP client for the DiseaseDx open search API
//!
//! Two endpoints matter: the per-kind list endpoint
//! (`/api/v1/open/search/{disease|gene}`) and the shared detail endpoint
//! (`/api/v1/open/search/detail`). Responses are JSON envelopes carrying an
//! `error` field alongside the payload; the client only decodes them, callers
//! decide what a truthy `error` means.

use crate::config::ApiConfig;
use crate::error::Result;
use crate::types::{DetailEnvelope, ListEnvelope, RecordKind};
use url::Url;

const SEARCH_PATH: &str = "api/v1/open/search";

/// Thin reqwest wrapper over the search endpoints.
///
/// Cheap to clone; the underlying connection pool is shared. No timeout is
/// configured beyond the transport default.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    locale: String,
}

impl ApiClient {
    /// Build a client from API settings. Fails only on an unparseable base URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(&config.base_url)?,
            locale: config.locale.clone(),
        })
    }

    /// Fetch one page of the list endpoint for `kind`.
    ///
    /// `letter` selects a page of a letter-paginated listing; `None` requests
    /// the whole list in one response (`type=all&letter=ALL`).
    pub async fn fetch_list(
        &self,
        kind: RecordKind,
        letter: Option<char>,
    ) -> Result<ListEnvelope> {
        let mut url = self
            .base_url
            .join(&format!("{SEARCH_PATH}/{}", kind.as_str()))?;
        {
            let mut query = url.query_pairs_mut();
            match letter {
                Some(letter) => {
                    query.append_pair("letter", &letter.to_string());
                }
                None => {
                    query.append_pair("type", "all");
                    query.append_pair("letter", "ALL");
                }
            }
            query.append_pair("lang", &self.locale);
        }
        Ok(self.http.get(url).send().await?.json().await?)
    }

    /// Fetch the detail envelope for one record.
    ///
    /// The empty `userId` parameter is part of the wire contract.
    pub async fn fetch_detail(
        &self,
        id: &str,
        kind: RecordKind,
        version: &str,
    ) -> Result<DetailEnvelope> {
        let mut url = self.base_url.join(&format!("{SEARCH_PATH}/detail"))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("id", id)
                .append_pair("type", kind.as_str())
                .append_pair("version", version)
                .append_pair("userId", "")
                .append_pair("lang", &self.locale);
        }
        Ok(self.http.get(url).send().await?.json().await?)
    }
}
