//! RSS 2.0 / RDF / Atom documents to [`NewsItem`].
//!
//! The document is read once. RSS `item` and Atom `entry` elements are
//! collected separately; items win whenever at least one exists, so a feed
//! never yields both kinds.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use newsdesk_core::{Category, NewsItem};

use crate::dates::parse_loose;
use crate::error::IngestError;
use crate::ident::feed_item_id;

const TITLE_FIELDS: &[&str] = &["title"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "summary", "content:encoded", "content"];
const LINK_FIELDS: &[&str] = &["link", "guid"];
const DATE_FIELDS: &[&str] = &["pubDate", "updated", "published", "dc:date"];

/// Which element an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    RssItem,
    AtomEntry,
}

impl EntryKind {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"item" => Some(Self::RssItem),
            b"entry" => Some(Self::AtomEntry),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct LinkAttrs {
    rel: Option<String>,
    href: Option<String>,
}

/// One `item`/`entry` with the text of the first descendant of each tracked
/// name and the attributes of every `link` descendant.
#[derive(Debug, Clone)]
struct RawEntry {
    kind: EntryKind,
    fields: Vec<(String, String)>,
    links: Vec<LinkAttrs>,
}

impl RawEntry {
    fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Text of the first descendant named `names[i]` that is non-empty,
    /// trying each name in turn. Only the first element of each name counts.
    fn read_text(&self, names: &[&str]) -> &str {
        names
            .iter()
            .filter_map(|name| self.fields.iter().find(|(n, _)| n == name))
            .map(|(_, text)| text.trim())
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    fn alternate_href(&self) -> &str {
        self.links
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate"))
            .or_else(|| self.links.first())
            .and_then(|l| l.href.as_deref())
            .map(str::trim)
            .unwrap_or_default()
    }

    /// Opens a field slot for `name` unless one already exists.
    fn open_field(&mut self, name: &str) -> Option<usize> {
        if !is_tracked(name) || self.fields.iter().any(|(n, _)| n == name) {
            return None;
        }
        self.fields.push((name.to_string(), String::new()));
        Some(self.fields.len() - 1)
    }
}

fn is_tracked(name: &str) -> bool {
    [TITLE_FIELDS, DESCRIPTION_FIELDS, LINK_FIELDS, DATE_FIELDS]
        .iter()
        .any(|group| group.contains(&name))
}

fn tag_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn link_attrs(e: &BytesStart<'_>) -> LinkAttrs {
    let mut attrs = LinkAttrs::default();
    for attr in e.attributes().flatten() {
        let value = attr
            .unescape_value()
            .map_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned(), Cow::into_owned);
        match attr.key.as_ref() {
            b"rel" => attrs.rel = Some(value),
            b"href" => attrs.href = Some(value),
            _ => {}
        }
    }
    attrs
}

fn text_of(e: &BytesText<'_>) -> String {
    unescape_lenient(&String::from_utf8_lossy(e))
}

/// Decodes each `&name;` reference on its own. References XML does not
/// define (HTML names such as `&nbsp;`) are kept verbatim, and a bare `&`
/// is kept as is.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let end = after.find(|c: char| c == ';' || c == '&' || c.is_whitespace());
        match end {
            Some(n) if n > 0 && after[n..].starts_with(';') => {
                let reference = &rest[amp..amp + n + 2];
                match unescape(reference) {
                    Ok(decoded) => out.push_str(&decoded),
                    Err(_) => out.push_str(reference),
                }
                rest = &after[n + 1..];
            }
            _ => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// In-progress entry plus, per open descendant, the field slot it feeds.
struct OpenEntry {
    entry: RawEntry,
    slots: Vec<Option<usize>>,
}

impl OpenEntry {
    fn push_text(&mut self, text: &str) {
        for idx in self.slots.iter().flatten() {
            self.entry.fields[*idx].1.push_str(text);
        }
    }
}

fn collect_entries(xml: &str) -> Result<Vec<RawEntry>, IngestError> {
    let mut reader = Reader::from_str(xml);

    let mut items = Vec::new();
    let mut entries = Vec::new();
    let mut open: Option<OpenEntry> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = tag_name(e.name().as_ref());
                match open.as_mut() {
                    Some(current) => {
                        if name == "link" {
                            current.entry.links.push(link_attrs(&e));
                        }
                        let slot = current.entry.open_field(&name);
                        current.slots.push(slot);
                    }
                    None => {
                        if let Some(kind) = EntryKind::from_tag(e.name().as_ref()) {
                            open = Some(OpenEntry {
                                entry: RawEntry::new(kind),
                                slots: Vec::new(),
                            });
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(current) = open.as_mut() {
                    let name = tag_name(e.name().as_ref());
                    if name == "link" {
                        current.entry.links.push(link_attrs(&e));
                    }
                    current.entry.open_field(&name);
                }
            }
            Event::End(_) => {
                if let Some(current) = open.as_mut() {
                    if current.slots.pop().is_none() {
                        if let Some(done) = open.take() {
                            match done.entry.kind {
                                EntryKind::RssItem => items.push(done.entry),
                                EntryKind::AtomEntry => entries.push(done.entry),
                            }
                        }
                    }
                }
            }
            Event::Text(e) => {
                if let Some(current) = open.as_mut() {
                    current.push_text(&text_of(&e));
                }
            }
            Event::CData(e) => {
                if let Some(current) = open.as_mut() {
                    current.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(if items.is_empty() { entries } else { items })
}

/// Parses a feed document into items attributed to `source`.
///
/// Entries with neither a title nor a link are dropped. Entries whose date
/// is missing or unparseable get `now_ms` and no `pub_date`.
///
/// # Errors
///
/// Returns [`IngestError::Xml`] if the document is not well-formed XML.
pub fn parse_feed(
    xml: &str,
    source: &str,
    category: Category,
    now_ms: i64,
) -> Result<Vec<NewsItem>, IngestError> {
    let raw = collect_entries(xml)?;
    Ok(raw
        .iter()
        .filter_map(|entry| to_item(entry, source, category, now_ms))
        .collect())
}

fn to_item(entry: &RawEntry, source: &str, category: Category, now_ms: i64) -> Option<NewsItem> {
    let title = entry.read_text(TITLE_FIELDS);
    let description = entry.read_text(DESCRIPTION_FIELDS);

    let mut link = entry.read_text(LINK_FIELDS);
    if link.is_empty() && entry.kind == EntryKind::AtomEntry {
        link = entry.alternate_href();
    }

    let date_text = entry.read_text(DATE_FIELDS);
    let parsed = parse_loose(date_text);
    let timestamp = parsed.map_or(now_ms, |dt| dt.timestamp_millis());

    if title.is_empty() && link.is_empty() {
        return None;
    }

    let date_key = if date_text.is_empty() {
        timestamp.to_string()
    } else {
        date_text.to_string()
    };

    Some(NewsItem {
        id: feed_item_id(category, link, title, &date_key),
        title: (if title.is_empty() { link } else { title }).to_string(),
        link: link.to_string(),
        pub_date: parsed.map(|_| date_text.to_string()),
        timestamp,
        description: (!description.is_empty()).then(|| description.to_string()),
        source: source.to_string(),
        category,
        is_alert: false,
        alert_keyword: None,
        region: None,
        topics: Vec::new(),
    })
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
