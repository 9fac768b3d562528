//! Per-category orchestration.
//!
//! A full run visits [`Category::FETCH_ORDER`] strictly in sequence with a
//! fixed pause between categories. Within one category the search request
//! and every feed request are in flight together. Nothing here returns an
//! error: a failing source degrades to an empty contribution.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use newsdesk_core::{AppConfig, Category, CategoryResult, NewsItem, SourcesConfig};

use crate::classify::Classifier;
use crate::dedup::{merge_sorted, sort_newest_first};
use crate::error::IngestError;
use crate::ident::{RandomTokens, TokenSource};
use crate::log::{IngestLog, TracingLog};
use crate::sources::{
    build_geo_query, category_query, fetch_feeds, fetch_search, SearchRequest, SourceOutcome,
};
use crate::transport::{Fetch, HttpFetcher};

const SCOPE: &str = "pipeline";

pub const DEFAULT_CATEGORY_DELAY: Duration = Duration::from_millis(2_000);

/// Waits between consecutive categories of a full run.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&self, duration: Duration);
}

/// [`Pacer`] backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A source that failed during a run and was degraded to no items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryError {
    pub category: Category,
    /// `search` or the feed name.
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchNewsResult {
    pub items: CategoryResult,
    pub errors: Vec<CategoryError>,
}

pub struct Pipeline<F, P = TokioPacer> {
    fetcher: F,
    pacer: P,
    sources: SourcesConfig,
    classifier: Classifier,
    log: Arc<dyn IngestLog>,
    tokens: Arc<dyn TokenSource>,
    search_base_url: String,
    category_delay: Duration,
}

impl Pipeline<HttpFetcher> {
    /// Production pipeline: HTTP transport, `tracing` logs and the delay,
    /// timeout and endpoint taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, sources: SourcesConfig) -> Result<Self, IngestError> {
        let fetcher = HttpFetcher::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Pipeline::new(fetcher, sources, &config.search_base_url)
            .with_category_delay(Duration::from_millis(config.category_delay_ms)))
    }
}

impl<F: Fetch> Pipeline<F> {
    /// Creates a pipeline with default logging, tokens, pacing and delay.
    #[must_use]
    pub fn new(fetcher: F, sources: SourcesConfig, search_base_url: &str) -> Self {
        let classifier = Classifier::new(&sources);
        Self {
            fetcher,
            pacer: TokioPacer,
            sources,
            classifier,
            log: Arc::new(TracingLog),
            tokens: Arc::new(RandomTokens),
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
            category_delay: DEFAULT_CATEGORY_DELAY,
        }
    }
}

impl<F: Fetch, P: Pacer> Pipeline<F, P> {
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn IngestLog>) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_category_delay(mut self, delay: Duration) -> Self {
        self.category_delay = delay;
        self
    }

    #[must_use]
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Pipeline<F, Q> {
        Pipeline {
            fetcher: self.fetcher,
            pacer,
            sources: self.sources,
            classifier: self.classifier,
            log: self.log,
            tokens: self.tokens,
            search_base_url: self.search_base_url,
            category_delay: self.category_delay,
        }
    }

    #[must_use]
    pub fn sources(&self) -> &SourcesConfig {
        &self.sources
    }

    /// Items for one category. `security` and `sysadmin` merge their feed
    /// list in and come back newest first; other categories keep search
    /// order.
    pub async fn fetch_category_news(&self, category: Category) -> Vec<NewsItem> {
        self.collect_category(category).await.items
    }

    /// Every category in [`Category::FETCH_ORDER`].
    pub async fn fetch_all_news(&self) -> CategoryResult {
        self.fetch_all_news_with_errors().await.items
    }

    /// Like [`fetch_all_news`](Self::fetch_all_news), also reporting which
    /// sources failed along the way.
    pub async fn fetch_all_news_with_errors(&self) -> FetchNewsResult {
        let mut result = FetchNewsResult::default();

        for (i, category) in Category::FETCH_ORDER.into_iter().enumerate() {
            if i > 0 {
                self.pacer.pause(self.category_delay).await;
            }

            let outcome = self.collect_category(category).await;
            self.log.info(
                SCOPE,
                &format!(
                    "{category}: {} items, {} failed sources",
                    outcome.items.len(),
                    outcome.failures.len()
                ),
            );
            result
                .errors
                .extend(outcome.failures.into_iter().map(|f| CategoryError {
                    category,
                    source: f.source,
                    message: f.message,
                }));
            result.items.insert(category, outcome.items);
        }

        result
    }

    /// Search results for a city/state, newest first. Blank inputs return
    /// nothing without a request.
    pub async fn fetch_local_news(&self, city: &str, state: &str) -> Vec<NewsItem> {
        let query = build_geo_query(city, state);
        if query.is_empty() {
            return Vec::new();
        }
        let mut items = self.search(Category::Local, &query).await.items;
        sort_newest_first(&mut items);
        items
    }

    async fn collect_category(&self, category: Category) -> SourceOutcome {
        let search = async {
            match category_query(category, &self.sources) {
                Some(query) => self.search(category, &query).await,
                None => {
                    self.log
                        .info(SCOPE, &format!("No search query for {category}"));
                    SourceOutcome::default()
                }
            }
        };

        if !category.merges_feeds() {
            return search.await;
        }

        let feeds = fetch_feeds(
            &self.fetcher,
            self.sources.feeds_for(category),
            category,
            self.log.as_ref(),
        );
        let (search, feeds) = tokio::join!(search, feeds);

        let mut failures = search.failures;
        failures.extend(feeds.failures);
        SourceOutcome {
            items: merge_sorted([feeds.items, search.items]),
            failures,
        }
    }

    async fn search(&self, category: Category, query: &str) -> SourceOutcome {
        let request = SearchRequest {
            base_url: &self.search_base_url,
            category,
            query,
            default_source: self.sources.default_source_name(category),
            classifier: &self.classifier,
            tokens: self.tokens.as_ref(),
            log: self.log.as_ref(),
        };
        fetch_search(&self.fetcher, &request).await
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
