use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Topical bucket that selects both search terms and feed lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Tech,
    Security,
    Sysadmin,
    Finance,
    Gov,
    Ai,
    Intel,
    Local,
}

impl Category {
    /// Order in which a full run visits categories. `Local` is driven by a
    /// location query instead and never appears here.
    pub const FETCH_ORDER: [Category; 8] = [
        Category::Politics,
        Category::Tech,
        Category::Security,
        Category::Sysadmin,
        Category::Finance,
        Category::Gov,
        Category::Ai,
        Category::Intel,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::Tech => "tech",
            Category::Security => "security",
            Category::Sysadmin => "sysadmin",
            Category::Finance => "finance",
            Category::Gov => "gov",
            Category::Ai => "ai",
            Category::Intel => "intel",
            Category::Local => "local",
        }
    }

    /// Categories whose search results are merged with their own feed list.
    #[must_use]
    pub fn merges_feeds(self) -> bool {
        matches!(self, Category::Security | Category::Sysadmin)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown news category '{0}'")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "politics" => Ok(Category::Politics),
            "tech" => Ok(Category::Tech),
            "security" => Ok(Category::Security),
            "sysadmin" => Ok(Category::Sysadmin),
            "finance" => Ok(Category::Finance),
            "gov" => Ok(Category::Gov),
            "ai" => Ok(Category::Ai),
            "intel" => Ok(Category::Intel),
            "local" => Ok(Category::Local),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// A normalized news item, regardless of which upstream produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Derived identifier, unique within a run.
    pub id: String,
    pub title: String,
    /// Canonical URL. Empty for malformed feed entries.
    pub link: String,
    /// Original date text exactly as the source provided it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    /// Epoch milliseconds used for ordering.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
    pub category: Category,
    #[serde(default)]
    pub is_alert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl NewsItem {
    /// Key used to collapse duplicates: the link when present, else the id.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        if self.link.is_empty() {
            &self.id
        } else {
            &self.link
        }
    }
}

/// Items per category from one orchestration run.
pub type CategoryResult = BTreeMap<Category, Vec<NewsItem>>;
