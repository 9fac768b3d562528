//! Wire formats to [`NewsItem`](newsdesk_core::NewsItem).

pub mod feed;
pub mod search;

pub use feed::{parse_feed, EntryKind};
pub use search::{
    parse_search_response, transform_article, SearchArticle, SearchContext, SearchResponse,
};
