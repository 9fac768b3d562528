//! Structured-search adapter against the GDELT DOC 2.0 article list.

use chrono::Utc;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use newsdesk_core::{Category, SourcesConfig};

use super::{excerpt, SourceOutcome};
use crate::classify::Classifier;
use crate::error::IngestError;
use crate::ident::TokenSource;
use crate::log::IngestLog;
use crate::normalize::search::{parse_search_response, transform_article, SearchContext};
use crate::transport::Fetch;

const SCOPE: &str = "search";
const EXCERPT_CHARS: usize = 100;

const POLITICS_QUERY: &str = "(politics OR government OR election OR congress)";
const TECH_QUERY: &str = r#"(technology OR software OR startup OR "silicon valley")"#;
const SECURITY_QUERY: &str = r#"(CVE OR vulnerability OR exploit OR "security advisory" OR "zero day" OR ransomware OR "privilege escalation" OR "remote code execution" OR "patch tuesday" OR "linux kernel" OR "windows server" OR sysadmin OR "system administrator" OR devops OR "site reliability" OR kubernetes OR vmware)"#;
const FINANCE_QUERY: &str = r#"(finance OR "stock market" OR economy OR banking)"#;
const GOV_QUERY: &str = r#"("federal government" OR "white house" OR congress OR regulation)"#;
const AI_QUERY: &str = r#"("artificial intelligence" OR "machine learning" OR AI OR ChatGPT)"#;
const INTEL_QUERY: &str = "(intelligence OR security OR military OR defense)";

/// Boolean OR query for `category`, without the language filter.
///
/// `sysadmin` is built from the configured keywords and is `None` when that
/// list is empty. `local` is always `None`; it is driven by a location query.
#[must_use]
pub fn category_query(category: Category, config: &SourcesConfig) -> Option<String> {
    let fixed = match category {
        Category::Politics => POLITICS_QUERY,
        Category::Tech => TECH_QUERY,
        Category::Security => SECURITY_QUERY,
        Category::Finance => FINANCE_QUERY,
        Category::Gov => GOV_QUERY,
        Category::Ai => AI_QUERY,
        Category::Intel => INTEL_QUERY,
        Category::Sysadmin => return or_query(&config.sysadmin_keywords),
        Category::Local => return None,
    };
    Some(fixed.to_string())
}

fn or_query(keywords: &[String]) -> Option<String> {
    let terms: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| {
            if k.contains(char::is_whitespace) {
                format!("\"{k}\"")
            } else {
                k.to_string()
            }
        })
        .collect();
    if terms.is_empty() {
        return None;
    }
    Some(format!("({})", terms.join(" OR ")))
}

/// Full article-list URL for `query` under `base_url`.
#[must_use]
pub fn search_url(base_url: &str, query: &str) -> String {
    let full = format!("{query} sourcelang:english");
    let encoded = utf8_percent_encode(&full, NON_ALPHANUMERIC);
    format!(
        "{}/doc?query={encoded}&timespan=7d&mode=artlist&maxrecords=20&format=json&sort=date",
        base_url.trim_end_matches('/')
    )
}

/// Everything one search call needs besides the transport.
pub(crate) struct SearchRequest<'a> {
    pub base_url: &'a str,
    pub category: Category,
    pub query: &'a str,
    pub default_source: Option<&'a str>,
    pub classifier: &'a Classifier,
    pub tokens: &'a dyn TokenSource,
    pub log: &'a dyn IngestLog,
}

/// Runs one search and normalizes the results. Never fails; problems are
/// logged and returned as [`SourceOutcome::failures`].
pub(crate) async fn fetch_search<F: Fetch>(fetcher: &F, req: &SearchRequest<'_>) -> SourceOutcome {
    let category = req.category;
    let url = search_url(req.base_url, req.query);
    req.log.info(SCOPE, &format!("Fetching {category} from search"));

    let response = match fetcher.fetch(&url).await {
        Ok(response) => response,
        Err(e) => {
            req.log.error(SCOPE, &format!("Error fetching {category}: {e}"));
            return SourceOutcome::failed(SCOPE, e.to_string());
        }
    };

    if !response.is_success() {
        let e = IngestError::UnexpectedStatus {
            status: response.status,
            url,
        };
        req.log.error(SCOPE, &format!("Error fetching {category}: {e}"));
        return SourceOutcome::failed(SCOPE, e.to_string());
    }

    if !response.is_json() {
        let e = IngestError::UnexpectedContentType {
            content_type: response.content_type,
            url,
        };
        req.log.warn(SCOPE, &format!("Non-JSON response for {category}: {e}"));
        return SourceOutcome::default();
    }

    let parsed = match parse_search_response(&response.body) {
        Ok(parsed) => parsed,
        Err(source) => {
            req.log.warn(
                SCOPE,
                &format!(
                    "Invalid JSON for {category}: {}",
                    excerpt(&response.body, EXCERPT_CHARS)
                ),
            );
            let e = IngestError::Deserialize {
                context: format!("{category} search response"),
                source,
            };
            return SourceOutcome::failed(SCOPE, e.to_string());
        }
    };

    let ctx = SearchContext {
        category,
        default_source: req.default_source,
        tokens: req.tokens,
        now_ms: Utc::now().timestamp_millis(),
    };
    let items = parsed
        .articles
        .iter()
        .enumerate()
        .map(|(index, article)| {
            let mut item = transform_article(article, index, &ctx);
            req.classifier.apply(&mut item);
            item
        })
        .collect();

    SourceOutcome {
        items,
        failures: Vec::new(),
    }
}
