//! Cross-source duplicate removal.

use std::collections::HashSet;

use newsdesk_core::NewsItem;

/// Drops every item whose [`NewsItem::dedup_key`] was already seen.
/// First occurrence wins; order is otherwise preserved.
#[must_use]
pub fn dedupe<I>(items: I) -> Vec<NewsItem>
where
    I: IntoIterator<Item = NewsItem>,
{
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.dedup_key().to_string()))
        .collect()
}

/// Newest first. Stable, so equal timestamps keep their input order.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Concatenates `lists` in order, dedupes, then sorts newest first.
///
/// Pass feed items before search items so feeds win on shared links.
#[must_use]
pub fn merge_sorted<L>(lists: L) -> Vec<NewsItem>
where
    L: IntoIterator<Item = Vec<NewsItem>>,
{
    let mut merged = dedupe(lists.into_iter().flatten());
    sort_newest_first(&mut merged);
    merged
}
