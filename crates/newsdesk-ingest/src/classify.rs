//! Title-based alert, region and topic tagging.

use newsdesk_core::{KeywordGroup, NewsItem, SourcesConfig};

/// Tags derived from one title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub alert_keyword: Option<String>,
    pub region: Option<String>,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone)]
struct LabelTable {
    label: String,
    keywords: Vec<String>,
}

impl LabelTable {
    fn from_group(group: &KeywordGroup) -> Self {
        Self {
            label: group.label.clone(),
            keywords: group.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Best match in this table as `(position, keyword length)`.
    fn best_match(&self, title: &str) -> Option<(usize, usize)> {
        self.keywords
            .iter()
            .filter_map(|kw| title.find(kw.as_str()).map(|pos| (pos, kw.len())))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
    }
}

/// Keyword matcher built once from [`SourcesConfig`]. All matching is
/// case-insensitive substring search.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// `(as configured, lowercased)`
    alerts: Vec<(String, String)>,
    regions: Vec<LabelTable>,
    topics: Vec<LabelTable>,
}

impl Classifier {
    #[must_use]
    pub fn new(config: &SourcesConfig) -> Self {
        Self {
            alerts: config
                .alert_keywords
                .iter()
                .map(|k| (k.clone(), k.to_lowercase()))
                .collect(),
            regions: config.regions.iter().map(LabelTable::from_group).collect(),
            topics: config.topics.iter().map(LabelTable::from_group).collect(),
        }
    }

    /// First alert keyword, in configured order, found in `title`.
    #[must_use]
    pub fn alert_keyword(&self, title: &str) -> Option<&str> {
        let lowered = title.to_lowercase();
        self.alerts
            .iter()
            .find(|(_, kw)| lowered.contains(kw.as_str()))
            .map(|(original, _)| original.as_str())
    }

    /// Region whose keyword starts earliest in `title`. Ties go to the longer
    /// keyword, then to the region listed first.
    #[must_use]
    pub fn region(&self, title: &str) -> Option<&str> {
        let lowered = title.to_lowercase();
        ranked(&self.regions, &lowered)
            .into_iter()
            .next()
    }

    /// Every topic with a keyword in `title`, ordered by where its earliest
    /// keyword starts.
    #[must_use]
    pub fn topics(&self, title: &str) -> Vec<String> {
        let lowered = title.to_lowercase();
        let mut out: Vec<String> = Vec::new();
        for label in ranked(&self.topics, &lowered) {
            if !out.iter().any(|t| t == label) {
                out.push(label.to_string());
            }
        }
        out
    }

    #[must_use]
    pub fn classify(&self, title: &str) -> Classification {
        Classification {
            alert_keyword: self.alert_keyword(title).map(str::to_string),
            region: self.region(title).map(str::to_string),
            topics: self.topics(title),
        }
    }

    /// Writes the classification of `item.title` onto the item.
    pub fn apply(&self, item: &mut NewsItem) {
        let Classification {
            alert_keyword,
            region,
            topics,
        } = self.classify(&item.title);
        item.is_alert = alert_keyword.is_some();
        item.alert_keyword = alert_keyword;
        item.region = region;
        item.topics = topics;
    }
}

/// Labels of matching tables, best match first. `sort_by` is stable, so
/// equal matches keep config order.
fn ranked<'a>(tables: &'a [LabelTable], lowered_title: &str) -> Vec<&'a str> {
    let mut hits: Vec<(usize, usize, &str)> = tables
        .iter()
        .filter_map(|t| {
            t.best_match(lowered_title)
                .map(|(pos, len)| (pos, len, t.label.as_str()))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    hits.into_iter().map(|(_, _, label)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, keywords: &[&str]) -> KeywordGroup {
        KeywordGroup {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    fn classifier() -> Classifier {
        let config = SourcesConfig {
            alert_keywords: vec!["Nuclear".to_string(), "strike".to_string()],
            regions: vec![
                group("Europe", &["ukraine", "russia"]),
                group("Middle East", &["iran", "israel"]),
                group("Arctic", &["north"]),
                group("Asia", &["korea", "north korea"]),
            ],
            topics: vec![
                group("nuclear", &["nuclear", "uranium"]),
                group("cyber", &["hack", "ransomware"]),
                group("military", &["strike", "nuclear"]),
            ],
            ..SourcesConfig::default()
        };
        Classifier::new(&config)
    }

    #[test]
    fn alert_uses_first_configured_keyword_case_insensitively() {
        let c = classifier();
        assert_eq!(c.alert_keyword("Drone STRIKE near nuclear plant"), Some("Nuclear"));
        assert_eq!(c.alert_keyword("Markets calm"), None);
    }

    #[test]
    fn region_prefers_earliest_match_regardless_of_config_order() {
        let c = classifier();
        assert_eq!(c.region("Iran talks with Russia"), Some("Middle East"));
        assert_eq!(c.region("Russia talks with Iran"), Some("Europe"));
        assert_eq!(c.region("Quiet day"), None);
    }

    #[test]
    fn region_tie_goes_to_longer_keyword() {
        let c = classifier();
        // "north" and "north korea" both start at 0.
        assert_eq!(c.region("North Korea tests"), Some("Asia"));
        assert_eq!(c.region("North Sea storm"), Some("Arctic"));
    }

    #[test]
    fn topics_are_ordered_by_position_without_duplicates() {
        let c = classifier();
        assert_eq!(
            c.topics("Ransomware hack hits uranium enrichment site"),
            vec!["cyber".to_string(), "nuclear".to_string()]
        );
        // "nuclear" matches two groups at the same spot; config order breaks the tie.
        assert_eq!(
            c.topics("Nuclear strike fears"),
            vec!["nuclear".to_string(), "military".to_string()]
        );
        assert!(c.topics("Nothing here").is_empty());
    }

    #[test]
    fn apply_sets_all_tags() {
        let c = classifier();
        let mut item = NewsItem {
            id: "gdelt-intel-x-0".to_string(),
            title: "Israel strike on Iran nuclear site".to_string(),
            link: "https://x.test".to_string(),
            pub_date: None,
            timestamp: 0,
            description: None,
            source: "x.test".to_string(),
            category: newsdesk_core::Category::Intel,
            is_alert: false,
            alert_keyword: None,
            region: None,
            topics: vec![],
        };
        c.apply(&mut item);
        assert!(item.is_alert);
        assert_eq!(item.alert_keyword.as_deref(), Some("Nuclear"));
        assert_eq!(item.region.as_deref(), Some("Middle East"));
        assert_eq!(item.topics, vec!["military".to_string(), "nuclear".to_string()]);
    }
}
