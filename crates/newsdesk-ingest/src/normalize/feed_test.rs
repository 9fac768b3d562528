use super::*;
use crate::ident::hash_code;

const NOW: i64 = 1_700_000_000_000;

const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Krebs on Security</title>
    <link>https://krebsonsecurity.com</link>
    <item>
      <title>Patch Tuesday, December Edition</title>
      <link>https://krebsonsecurity.com/2025/12/patch-tuesday/</link>
      <pubDate>Tue, 09 Dec 2025 18:00:00 +0000</pubDate>
      <description><![CDATA[<p>Microsoft fixed 57 flaws.</p>]]></description>
    </item>
    <item>
      <title></title>
      <link></link>
      <pubDate>Tue, 09 Dec 2025 17:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Cloudflare Status</title>
  <link href="https://www.cloudflarestatus.com" rel="alternate"/>
  <entry>
    <title>Elevated errors in Frankfurt</title>
    <link rel="self" href="https://www.cloudflarestatus.com/self/1"/>
    <link rel="alternate" href="https://www.cloudflarestatus.com/incidents/1"/>
    <updated>2025-12-09T10:15:00Z</updated>
    <summary>We are investigating.</summary>
  </entry>
  <entry>
    <title>Scheduled maintenance</title>
    <link href="https://www.cloudflarestatus.com/incidents/2"/>
    <published>2025-12-08T08:00:00Z</published>
  </entry>
</feed>"#;

#[test]
fn parses_rss_items_and_skips_untitled_unlinked() {
    let items = parse_feed(RSS, "Krebs on Security", Category::Security, NOW).unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.title, "Patch Tuesday, December Edition");
    assert_eq!(item.link, "https://krebsonsecurity.com/2025/12/patch-tuesday/");
    assert_eq!(item.source, "Krebs on Security");
    assert_eq!(item.category, Category::Security);
    assert_eq!(
        item.pub_date.as_deref(),
        Some("Tue, 09 Dec 2025 18:00:00 +0000")
    );
    assert_eq!(item.timestamp, 1_765_303_200_000);
    assert_eq!(
        item.description.as_deref(),
        Some("<p>Microsoft fixed 57 flaws.</p>")
    );
    assert_eq!(
        item.id,
        format!("rss-security-{}", hash_code("https://krebsonsecurity.com/2025/12/patch-tuesday/"))
    );
    assert!(!item.is_alert);
    assert!(item.topics.is_empty());
}

#[test]
fn atom_only_document_uses_entries_and_alternate_link() {
    let items = parse_feed(ATOM, "Cloudflare Status", Category::Sysadmin, NOW).unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].link, "https://www.cloudflarestatus.com/incidents/1");
    assert_eq!(items[0].description.as_deref(), Some("We are investigating."));
    assert_eq!(items[0].pub_date.as_deref(), Some("2025-12-09T10:15:00Z"));

    // No rel attribute: the first link is used.
    assert_eq!(items[1].link, "https://www.cloudflarestatus.com/incidents/2");
    assert_eq!(items[1].pub_date.as_deref(), Some("2025-12-08T08:00:00Z"));

    for item in &items {
        assert!(item.id.starts_with("rss-sysadmin-"));
        assert!(item.id.len() > "rss-sysadmin-".len());
    }
}

#[test]
fn rss_items_take_precedence_over_atom_entries() {
    let mixed = r#"<root>
      <entry><title>Atom one</title><link href="https://a.test/1"/></entry>
      <item><title>RSS one</title><link>https://r.test/1</link></item>
    </root>"#;
    let items = parse_feed(mixed, "Mixed", Category::Security, NOW).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "RSS one");
}

#[test]
fn rss_item_does_not_read_link_href() {
    let xml = r#"<rss><channel><item>
      <title>Only href</title>
      <link href="https://r.test/href"/>
    </item></channel></rss>"#;
    let items = parse_feed(xml, "Src", Category::Security, NOW).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link, "");
    assert_eq!(items[0].title, "Only href");
}

#[test]
fn guid_fills_in_for_missing_link() {
    let xml = r#"<rss><channel><item>
      <title>Guid only</title>
      <guid isPermaLink="true">https://r.test/guid</guid>
    </item></channel></rss>"#;
    let items = parse_feed(xml, "Src", Category::Security, NOW).unwrap();
    assert_eq!(items[0].link, "https://r.test/guid");
}

#[test]
fn missing_or_bad_date_uses_now_and_drops_pub_date() {
    let xml = r#"<rss><channel>
      <item><title>No date</title></item>
      <item><title>Bad date</title><pubDate>someday</pubDate></item>
    </channel></rss>"#;
    let items = parse_feed(xml, "Src", Category::Security, NOW).unwrap();
    assert_eq!(items.len(), 2);
    for item in &items {
        assert_eq!(item.timestamp, NOW);
        assert_eq!(item.pub_date, None);
        assert_eq!(item.link, "");
    }
    // Linkless ids hash title plus the date text, or the timestamp when absent.
    assert_eq!(
        items[0].id,
        format!("rss-security-{}", hash_code(&format!("No date-{NOW}")))
    );
    assert_eq!(
        items[1].id,
        format!("rss-security-{}", hash_code("Bad date-someday"))
    );
}

#[test]
fn link_only_item_uses_link_as_title() {
    let xml = r"<rss><channel><item><link>https://r.test/x</link></item></channel></rss>";
    let items = parse_feed(xml, "Src", Category::Security, NOW).unwrap();
    assert_eq!(items[0].title, "https://r.test/x");
}

#[test]
fn text_content_includes_descendants_and_entities() {
    let xml = r#"<rss><channel><item>
      <title>AT&amp;T <b>outage</b> report</title>
      <link>https://r.test/att</link>
      <dc:date>2025-12-09T10:15:00Z</dc:date>
      <content:encoded>full body</content:encoded>
    </item></channel></rss>"#;
    let items = parse_feed(xml, "Src", Category::Sysadmin, NOW).unwrap();
    assert_eq!(items[0].title, "AT&T outage report");
    assert_eq!(items[0].pub_date.as_deref(), Some("2025-12-09T10:15:00Z"));
    assert_eq!(items[0].description.as_deref(), Some("full body"));
}

#[test]
fn unknown_entities_stay_verbatim_without_blocking_known_ones() {
    let xml = r#"<rss><channel><item>
      <title>Caf&eacute; &amp; bar&nbsp;x &#233;</title>
      <link>https://r.test/cafe?a=1&amp;b=2</link>
    </item></channel></rss>"#;
    let items = parse_feed(xml, "Src", Category::Security, NOW).unwrap();
    assert_eq!(items[0].title, "Caf&eacute; & bar&nbsp;x \u{e9}");
    assert_eq!(items[0].link, "https://r.test/cafe?a=1&b=2");
}

#[test]
fn lenient_unescape_keeps_bare_ampersands() {
    assert_eq!(unescape_lenient("Q&A & more"), "Q&A & more");
    assert_eq!(unescape_lenient("a &lt;b&gt; &;"), "a <b> &;");
    assert_eq!(unescape_lenient("trailing &amp"), "trailing &amp");
}

#[test]
fn malformed_xml_is_an_error() {
    let xml = "<rss><channel><item><title>x</channel></rss>";
    let err = parse_feed(xml, "Src", Category::Security, NOW).unwrap_err();
    assert!(matches!(err, IngestError::Xml(_)));
}

#[test]
fn empty_document_yields_nothing() {
    assert!(parse_feed("", "Src", Category::Security, NOW).unwrap().is_empty());
    assert!(parse_feed("<rss><channel/></rss>", "Src", Category::Security, NOW)
        .unwrap()
        .is_empty());
}
