//! Source adapters.
//!
//! Each adapter catches its own failures, logs them through the injected
//! [`IngestLog`](crate::log::IngestLog), and reports them alongside whatever
//! items it did manage to produce.

mod feeds;
mod geo;
mod search;

pub(crate) use feeds::fetch_feeds;
pub use geo::build_geo_query;
pub use search::{category_query, search_url};
pub(crate) use search::{fetch_search, SearchRequest};

use newsdesk_core::NewsItem;

/// A source that was degraded to zero items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// `search` or the configured feed name.
    pub source: String,
    pub message: String,
}

/// Items from one adapter call plus any failures it swallowed.
#[derive(Debug, Default)]
pub struct SourceOutcome {
    pub items: Vec<NewsItem>,
    pub failures: Vec<SourceFailure>,
}

impl SourceOutcome {
    fn failed(source: &str, message: String) -> Self {
        Self {
            items: Vec::new(),
            failures: vec![SourceFailure {
                source: source.to_string(),
                message,
            }],
        }
    }
}

/// First `max` characters of `text`, for log lines about bad payloads.
pub(crate) fn excerpt(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
