//! Notion data-source client and content serialization pipeline.
//!
//! Queries a journal database over a date range, renders each page's typed
//! properties and block content to plain text, and caches the concatenated
//! result keyed by the resolved range.

mod blocks;
mod client;
mod markdown;
mod properties;
mod serializer;

pub use blocks::{render_blocks, Block};
pub use client::{NotionClient, NotionConfig, NotionError, Page, DEFAULT_NOTION_API_BASE};
pub use markdown::trim_links;
pub use properties::{render_property_lines, PropertyValue};
pub use serializer::{NotionSerializer, SerializeError};
