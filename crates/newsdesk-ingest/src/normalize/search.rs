//! GDELT DOC 2.0 article records to [`NewsItem`].

use serde::{Deserialize, Deserializer};

use newsdesk_core::{Category, NewsItem};

use crate::dates::parse_seendate;
use crate::ident::{search_item_id, TokenSource};

/// Body of an `artlist` response. A missing or `null` `articles` key means
/// no results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub articles: Vec<SearchArticle>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    /// Compact `YYYYMMDDThhmmssZ` stamp.
    pub seendate: Option<String>,
    pub domain: Option<String>,
    pub socialimage: Option<String>,
}

/// Per-request inputs shared by every article in one response.
pub struct SearchContext<'a> {
    pub category: Category,
    /// First configured feed name for the category, if any.
    pub default_source: Option<&'a str>,
    pub tokens: &'a dyn TokenSource,
    /// Fallback timestamp for unparseable dates, epoch millis.
    pub now_ms: i64,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds one item from the article at `index` of the result list.
///
/// Classification tags are left unset; the caller applies them.
#[must_use]
pub fn transform_article(article: &SearchArticle, index: usize, ctx: &SearchContext<'_>) -> NewsItem {
    let link = non_empty(article.url.as_deref()).unwrap_or_default().to_string();
    let title = match non_empty(article.title.as_deref()) {
        Some(title) => title.to_string(),
        None => link.clone(),
    };

    let seendate = non_empty(article.seendate.as_deref());
    let timestamp = seendate
        .and_then(parse_seendate)
        .map_or(ctx.now_ms, |dt| dt.timestamp_millis());

    let source = non_empty(article.domain.as_deref())
        .or(ctx.default_source)
        .unwrap_or("Unknown")
        .to_string();

    NewsItem {
        id: search_item_id(ctx.category, Some(link.as_str()), index, ctx.tokens),
        title,
        link,
        pub_date: seendate.map(str::to_string),
        timestamp,
        description: None,
        source,
        category: ctx.category,
        is_alert: false,
        alert_keyword: None,
        region: None,
        topics: Vec::new(),
    }
}

/// Parses a response body. Errors are left to the caller to report.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` when `body` is not a valid
/// response document.
pub fn parse_search_response(body: &str) -> Result<SearchResponse, serde_json::Error> {
    serde_json::from_str(body)
}
