use futures_util::future;
use thiserror::Error;

use lens_core::date_range::{resolve_range, DateInput, DateRangeError};
use lens_core::ContentCache;

use crate::client::{NotionClient, NotionError, Page};
use crate::markdown::trim_links;
use crate::properties::render_property_lines;

#[derive(Debug, Error)]
/// Failures produced while serializing database contents.
pub enum SerializeError {
    #[error(transparent)]
    Range(#[from] DateRangeError),
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("failed to fetch notion contents: {0}")]
    Fetch(String),
    #[error("failed to write content cache: {0}")]
    Cache(anyhow::Error),
}

impl From<NotionError> for SerializeError {
    fn from(error: NotionError) -> Self {
        match error {
            NotionError::InvalidDateFormat(raw) => Self::InvalidDateFormat(raw),
            // The upstream message is preserved for structured API errors;
            // everything else degrades to its display form.
            NotionError::Api { message, .. } => Self::Fetch(message),
            other => Self::Fetch(other.to_string()),
        }
    }
}

/// Resolves a date range, serves serialized contents from the cache when
/// possible, and otherwise fetches and serializes every page in range.
///
/// The client and cache are injected so the pipeline can be exercised
/// without touching the real API or filesystem.
pub struct NotionSerializer {
    client: NotionClient,
    database_id: String,
    cache: Option<ContentCache>,
}

impl NotionSerializer {
    pub fn new(client: NotionClient, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: ContentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the serialized contents for the resolved range.
    ///
    /// Cached text is returned as-is unless `force` is set; a forced refresh
    /// still writes the fresh result back. A fetch failure discards partial
    /// results and leaves the cache untouched.
    pub async fn get_contents(
        &self,
        from: Option<DateInput>,
        to: Option<DateInput>,
        force: bool,
    ) -> Result<String, SerializeError> {
        let range = resolve_range(from, to)?;
        let cache_key = range.cache_key();

        if !force {
            if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.read(&cache_key)) {
                tracing::info!(key = %cache_key, "cached notion contents found");
                return Ok(cached);
            }
        }

        tracing::info!(from = %range.from, to = %range.to, "fetching notion contents");
        let pages = self
            .client
            .query_database(&self.database_id, &range.from, &range.to)
            .await?;

        // Pages serialize concurrently but join in query-result order so the
        // output stays deterministic.
        let texts =
            future::try_join_all(pages.iter().map(|page| self.serialize_page(page))).await?;
        let contents = texts.concat();
        tracing::info!(pages = pages.len(), "fetched notion contents");

        if let Some(cache) = &self.cache {
            cache
                .write(&cache_key, &contents)
                .map_err(SerializeError::Cache)?;
            tracing::info!(key = %cache_key, "cached notion contents");
        }

        Ok(contents)
    }

    async fn serialize_page(&self, page: &Page) -> Result<String, SerializeError> {
        if page.object != "page" {
            return Ok(String::new());
        }

        let mut text = render_property_lines(&page.properties)
            .map_err(SerializeError::from)?
            .join(" ");

        let markdown = self.client.fetch_page_markdown(&page.id).await?;
        text.push('\n');
        // Trimming saves tokens downstream without losing the narrative.
        text.push_str(&trim_links(&markdown));
        text.push_str("\n---\n");

        Ok(text)
    }
}
