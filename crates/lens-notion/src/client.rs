use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::blocks::{render_blocks, Block};

pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";

const NOTION_VERSION: &str = "2022-06-28";
const BLOCK_PAGE_SIZE: u32 = 100;
const DATE_PROPERTY: &str = "Date";

#[derive(Debug, Error)]
/// Failures surfaced by the Notion data source.
pub enum NotionError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("invalid API key header: {0}")]
    InvalidApiKey(String),
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("notion returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_base: String,
    pub api_key: String,
    pub request_timeout_ms: u64,
}

/// Thin client over the Notion REST API: paginated database queries and
/// block-content retrieval rendered to markdown.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    config: NotionConfig,
}

/// One database entry. Properties stay as raw JSON values here; the typed
/// conversion happens at extraction time so a malformed property fails the
/// page it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub object: String,
    pub id: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, NotionError> {
        if config.api_key.trim().is_empty() {
            return Err(NotionError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));

        let bearer = format!("Bearer {}", config.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|error| NotionError::InvalidApiKey(error.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_base.trim_end_matches('/'))
    }

    /// Returns every page whose `Date` property falls inside `[from, to]`,
    /// ascending by date, following pagination cursors until exhausted.
    pub async fn query_database(
        &self,
        database_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<Page>, NotionError> {
        for bound in [from, to] {
            if DateTime::parse_from_rfc3339(bound).is_err() {
                return Err(NotionError::InvalidDateFormat(bound.to_string()));
            }
        }

        let url = self.endpoint(&format!("databases/{database_id}/query"));
        let mut pages = Vec::new();
        let mut start_cursor: Option<String> = None;

        loop {
            let mut body = json!({
                "sorts": [{
                    "property": DATE_PROPERTY,
                    "direction": "ascending",
                }],
                "filter": {
                    "and": [
                        { "property": DATE_PROPERTY, "date": { "on_or_after": from } },
                        { "property": DATE_PROPERTY, "date": { "on_or_before": to } },
                    ],
                },
            });
            if let Some(cursor) = start_cursor.as_deref() {
                body["start_cursor"] = json!(cursor);
            }

            let response = self.client.post(&url).json(&body).send().await?;
            let status = response.status();
            let raw = response.text().await?;
            if !status.is_success() {
                return Err(api_error(status.as_u16(), &raw));
            }

            let parsed: QueryResponse = serde_json::from_str(&raw)?;
            tracing::debug!(
                count = parsed.results.len(),
                has_more = parsed.has_more,
                "fetched database query page"
            );
            pages.extend(parsed.results);

            match (parsed.has_more, parsed.next_cursor) {
                (true, Some(cursor)) => start_cursor = Some(cursor),
                _ => break,
            }
        }

        Ok(pages)
    }

    /// Fetches a page's block children (all pagination pages) and renders
    /// them to markdown.
    pub async fn fetch_page_markdown(&self, page_id: &str) -> Result<String, NotionError> {
        let url = self.endpoint(&format!("blocks/{page_id}/children"));
        let mut blocks: Vec<Block> = Vec::new();
        let mut start_cursor: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("page_size", BLOCK_PAGE_SIZE.to_string())]);
            if let Some(cursor) = start_cursor.as_deref() {
                request = request.query(&[("start_cursor", cursor)]);
            }

            let response = request.send().await?;
            let status = response.status();
            let raw = response.text().await?;
            if !status.is_success() {
                return Err(api_error(status.as_u16(), &raw));
            }

            let parsed: BlockListResponse = serde_json::from_str(&raw)?;
            blocks.extend(parsed.results);

            match (parsed.has_more, parsed.next_cursor) {
                (true, Some(cursor)) => start_cursor = Some(cursor),
                _ => break,
            }
        }

        Ok(render_blocks(&blocks))
    }
}

/// Maps a non-success response to [`NotionError::Api`], preserving the
/// upstream message when the body is a structured Notion error.
fn api_error(status: u16, raw: &str) -> NotionError {
    let message = serde_json::from_str::<NotionErrorBody>(raw)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| raw.to_string());
    NotionError::Api { status, message }
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockListResponse {
    results: Vec<Block>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}
