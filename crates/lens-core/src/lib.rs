//! Foundational utilities shared across lens crates.
//!
//! Provides date-range resolution for content queries, the flat-file content
//! cache, and the atomic file-write helper both rely on.

pub mod atomic_io;
pub mod cache;
pub mod date_range;

pub use atomic_io::write_text_atomic;
pub use cache::ContentCache;
pub use date_range::{resolve_range, DateInput, DateParseError, DateRange, DateRangeError};
