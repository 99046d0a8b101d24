/// Notion client — the only place this service talks to the CMS.
///
/// Handlers and content operations depend on the `NotionApi` trait; `AppState`
/// carries an `Arc<dyn NotionApi>` so tests can swap in the in-memory backend.
///
/// Failed calls are not retried: one upstream failure fails the request.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod query;

use models::{ApiErrorBody, Block, ListResponse, Page};
use query::DatabaseQuery;

pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl NotionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotionError::Api { status: 404, .. })
    }
}

/// Read-only view of the CMS used by the content layer.
/// List operations return every result, following pagination cursors.
#[async_trait]
pub trait NotionApi: Send + Sync {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>, NotionError>;

    async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError>;

    /// Direct children of a block or page, in document order.
    async fn block_children(&self, block_id: &str) -> Result<Vec<Block>, NotionError>;
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    #[serde(flatten)]
    query: &'a DatabaseQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    page_size: u32,
}

/// Notion REST client.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NotionClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, NotionError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NotionError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(e) => (e.code, e.message),
                Err(_) => (String::new(), body),
            };
            return Err(NotionError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>, NotionError> {
        let url = self.url(&format!("/databases/{database_id}/query"));
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = QueryBody {
                query,
                start_cursor: cursor.as_deref(),
                page_size: PAGE_SIZE,
            };
            let batch: ListResponse<Page> = self.send(self.client.post(&url).json(&body)).await?;
            pages.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Queried database {database_id}: {} pages", pages.len());
        Ok(pages)
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        let url = self.url(&format!("/pages/{page_id}"));
        let page: Page = self.send(self.client.get(&url)).await?;
        debug!("Retrieved page {page_id}");
        Ok(page)
    }

    async fn block_children(&self, block_id: &str) -> Result<Vec<Block>, NotionError> {
        let url = self.url(&format!("/blocks/{block_id}/children"));
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params = vec![("page_size", PAGE_SIZE.to_string())];
            if let Some(c) = &cursor {
                params.push(("start_cursor", c.clone()));
            }
            let batch: ListResponse<Block> =
                self.send(self.client.get(&url).query(&params)).await?;
            blocks.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Fetched {} children of block {block_id}", blocks.len());
        Ok(blocks)
    }
}
