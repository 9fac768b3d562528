//! Feed lists and keyword tables injected into the ingest pipeline.
//!
//! Loaded once at startup from `config/sources.yaml`. Any section missing
//! from the file falls back to the built-in defaults, so an empty file is a
//! valid configuration.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::news::Category;
use crate::ConfigError;

/// One RSS/Atom feed polled for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// A label together with the title substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub feeds: BTreeMap<Category, Vec<FeedSource>>,
    /// Checked in order; the first hit marks an item as an alert.
    pub alert_keywords: Vec<String>,
    pub regions: Vec<KeywordGroup>,
    pub topics: Vec<KeywordGroup>,
    /// Search terms for the `sysadmin` category, OR-joined at query time.
    pub sysadmin_keywords: Vec<String>,
}

impl SourcesConfig {
    /// Feeds configured for `category`; empty when none are.
    #[must_use]
    pub fn feeds_for(&self, category: Category) -> &[FeedSource] {
        self.feeds
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Name used for search results that carry no domain of their own.
    #[must_use]
    pub fn default_source_name(&self, category: Category) -> Option<&str> {
        self.feeds_for(category).first().map(|f| f.name.as_str())
    }
}

fn feed(name: &str, url: &str) -> FeedSource {
    FeedSource {
        name: name.to_string(),
        url: url.to_string(),
    }
}

fn group(label: &str, keywords: &[&str]) -> KeywordGroup {
    KeywordGroup {
        label: label.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let mut feeds = BTreeMap::new();
        feeds.insert(
            Category::Security,
            vec![
                feed("Krebs on Security", "https://krebsonsecurity.com/feed/"),
                feed("The Hacker News", "https://feeds.feedburner.com/TheHackersNews"),
                feed("BleepingComputer", "https://www.bleepingcomputer.com/feed/"),
                feed(
                    "CISA Advisories",
                    "https://www.cisa.gov/cybersecurity-advisories/all.xml",
                ),
            ],
        );
        feeds.insert(
            Category::Sysadmin,
            vec![
                feed("LWN", "https://lwn.net/headlines/rss"),
                feed("Kubernetes Blog", "https://kubernetes.io/feed.xml"),
                feed("Cloudflare Status", "https://www.cloudflarestatus.com/history.atom"),
            ],
        );

        Self {
            feeds,
            alert_keywords: strings(&[
                "war",
                "invasion",
                "military",
                "nuclear",
                "sanctions",
                "missile",
                "attack",
                "troops",
                "conflict",
                "strike",
                "bomb",
                "casualties",
                "ceasefire",
                "coup",
                "martial law",
                "emergency",
                "assassination",
                "terrorist",
                "hostage",
                "zero day",
                "ransomware",
                "outage",
            ]),
            regions: vec![
                group("Middle East", &["israel", "gaza", "iran", "syria", "yemen", "lebanon", "saudi"]),
                group("Europe", &["ukraine", "russia", "kremlin", "nato", "european union", "germany", "france"]),
                group("Asia-Pacific", &["china", "taiwan", "beijing", "japan", "north korea", "south korea", "philippines"]),
                group("Americas", &["united states", "washington", "mexico", "canada", "venezuela", "brazil"]),
                group("Africa", &["sudan", "nigeria", "ethiopia", "congo", "sahel", "somalia"]),
            ],
            topics: vec![
                group("cyber", &["cyber", "hack", "ransomware", "malware", "breach", "cve", "exploit"]),
                group("nuclear", &["nuclear", "uranium", "enrichment"]),
                group("economy", &["tariff", "inflation", "recession", "interest rate", "stock market"]),
                group("ai", &["artificial intelligence", "openai", "machine learning", "chatgpt"]),
                group("elections", &["election", "ballot", "polls", "campaign"]),
                group("infrastructure", &["outage", "kubernetes", "linux kernel", "data center", "cloud"]),
            ],
            sysadmin_keywords: strings(&[
                "sysadmin",
                "system administrator",
                "devops",
                "site reliability",
                "kubernetes",
                "linux kernel",
                "windows server",
                "patch tuesday",
                "outage",
                "incident report",
            ]),
        }
    }
}

/// Load and validate the sources configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sources(&content)
}

/// Parse and validate sources YAML held in memory.
///
/// An empty document yields [`SourcesConfig::default`].
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesConfig, ConfigError> {
    let config: SourcesConfig = if content.trim().is_empty() {
        SourcesConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    validate_sources(&config)?;
    Ok(config)
}

fn validate_sources(config: &SourcesConfig) -> Result<(), ConfigError> {
    if !config.feeds_for(Category::Local).is_empty() {
        return Err(ConfigError::Validation(
            "category 'local' is query-driven and cannot have feeds".to_string(),
        ));
    }

    for (category, feeds) in &config.feeds {
        let mut seen_urls = HashSet::new();
        for feed in feeds {
            if feed.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "feed in category '{category}' has an empty name"
                )));
            }
            let url = feed.url.trim().to_lowercase();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "feed '{}' in category '{category}' has non-http URL '{}'",
                    feed.name, feed.url
                )));
            }
            if !seen_urls.insert(url) {
                return Err(ConfigError::Validation(format!(
                    "duplicate feed URL in category '{category}': '{}'",
                    feed.url
                )));
            }
        }
    }

    check_keywords("alert_keywords", &config.alert_keywords)?;
    check_keywords("sysadmin_keywords", &config.sysadmin_keywords)?;
    for (section, groups) in [("regions", &config.regions), ("topics", &config.topics)] {
        for group in groups {
            if group.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{section} entry has an empty label"
                )));
            }
            check_keywords(&format!("{section}.{}", group.label), &group.keywords)?;
        }
    }

    Ok(())
}

fn check_keywords(section: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{section} contains an empty keyword"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
