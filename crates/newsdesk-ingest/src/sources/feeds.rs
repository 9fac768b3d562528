//! Feed-list adapter: one request per configured feed, all in flight at once.

use chrono::Utc;
use futures::future::join_all;

use newsdesk_core::{Category, FeedSource, NewsItem};

use super::{excerpt, SourceFailure, SourceOutcome};
use crate::error::IngestError;
use crate::log::IngestLog;
use crate::normalize::feed::parse_feed;
use crate::transport::Fetch;

const SCOPE: &str = "feeds";
const EXCERPT_CHARS: usize = 100;

/// Fetches every feed concurrently and keeps whatever succeeded.
///
/// No request is made when `feeds` is empty. A failing feed contributes a
/// warning and a [`SourceFailure`], never an error.
pub(crate) async fn fetch_feeds<F: Fetch>(
    fetcher: &F,
    feeds: &[FeedSource],
    category: Category,
    log: &dyn IngestLog,
) -> SourceOutcome {
    if feeds.is_empty() {
        return SourceOutcome::default();
    }

    let now_ms = Utc::now().timestamp_millis();
    let results = join_all(
        feeds
            .iter()
            .map(|feed| fetch_one(fetcher, feed, category, now_ms, log)),
    )
    .await;

    let mut outcome = SourceOutcome::default();
    for result in results {
        match result {
            Ok(items) => outcome.items.extend(items),
            Err(failure) => outcome.failures.push(failure),
        }
    }
    outcome
}

async fn fetch_one<F: Fetch>(
    fetcher: &F,
    feed: &FeedSource,
    category: Category,
    now_ms: i64,
    log: &dyn IngestLog,
) -> Result<Vec<NewsItem>, SourceFailure> {
    let fail = |message: String| SourceFailure {
        source: feed.name.clone(),
        message,
    };

    let response = fetcher.fetch(&feed.url).await.map_err(|e| {
        log.warn(SCOPE, &format!("Feed fetch error ({}): {e}", feed.name));
        fail(e.to_string())
    })?;

    if !response.is_success() {
        let e = IngestError::UnexpectedStatus {
            status: response.status,
            url: feed.url.clone(),
        };
        log.warn(
            SCOPE,
            &format!("Feed fetch failed ({}): {}", feed.name, response.status),
        );
        return Err(fail(e.to_string()));
    }

    parse_feed(&response.body, &feed.name, category, now_ms).map_err(|e| {
        log.warn(
            SCOPE,
            &format!(
                "Malformed feed ({}): {e}; body starts {:?}",
                feed.name,
                excerpt(&response.body, EXCERPT_CHARS)
            ),
        );
        fail(e.to_string())
    })
}
