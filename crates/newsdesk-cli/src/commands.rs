//! Subcommand handlers. Each one prints pretty JSON on stdout.

use anyhow::Context;
use newsdesk_core::{load_sources, AppConfig, Category, SourcesConfig};
use newsdesk_ingest::{HttpFetcher, Pipeline};
use serde::Serialize;

/// Sources from the configured file, or the built-in defaults when the file
/// does not exist.
pub(crate) fn resolve_sources(config: &AppConfig) -> anyhow::Result<SourcesConfig> {
    if !config.sources_path.exists() {
        tracing::warn!(
            path = %config.sources_path.display(),
            "sources file not found; using built-in feeds and keywords"
        );
        return Ok(SourcesConfig::default());
    }
    load_sources(&config.sources_path)
        .with_context(|| format!("loading {}", config.sources_path.display()))
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<Pipeline<HttpFetcher>> {
    let sources = resolve_sources(config)?;
    Pipeline::from_config(config, sources).context("building HTTP client")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_category(config: &AppConfig, category: Category) -> anyhow::Result<()> {
    if category == Category::Local {
        anyhow::bail!("category 'local' needs a location; use `newsdesk local --city .. --state ..`");
    }
    let pipeline = build_pipeline(config)?;
    let items = pipeline.fetch_category_news(category).await;
    tracing::info!(category = %category, count = items.len(), "category fetched");
    print_json(&items)
}

pub(crate) async fn run_all(config: &AppConfig, with_errors: bool) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    if with_errors {
        let result = pipeline.fetch_all_news_with_errors().await;
        tracing::info!(errors = result.errors.len(), "full run finished");
        print_json(&result)
    } else {
        let items = pipeline.fetch_all_news().await;
        print_json(&items)
    }
}

pub(crate) async fn run_local(config: &AppConfig, city: &str, state: &str) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let items = pipeline.fetch_local_news(city, state).await;
    tracing::info!(city, state, count = items.len(), "local news fetched");
    print_json(&items)
}

pub(crate) fn run_check_config(config: &AppConfig) -> anyhow::Result<()> {
    let sources = resolve_sources(config)?;
    print_json(&config_summary(config, &sources))
}

pub(crate) fn config_summary(config: &AppConfig, sources: &SourcesConfig) -> serde_json::Value {
    let feeds: serde_json::Map<String, serde_json::Value> = sources
        .feeds
        .iter()
        .map(|(category, feeds)| (category.to_string(), serde_json::json!(feeds.len())))
        .collect();

    serde_json::json!({
        "env": config.env.to_string(),
        "sourcesPath": config.sources_path.display().to_string(),
        "searchBaseUrl": config.search_base_url,
        "categoryDelayMs": config.category_delay_ms,
        "requestTimeoutSecs": config.request_timeout_secs,
        "feeds": feeds,
        "alertKeywords": sources.alert_keywords.len(),
        "regions": sources.regions.len(),
        "topics": sources.topics.len(),
        "sysadminKeywords": sources.sysadmin_keywords.len(),
    })
}
