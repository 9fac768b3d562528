//! Date parsing for upstream timestamps.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

static COMPACT_SEENDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})Z$").expect("valid seendate regex")
});

/// Offset-less layouts tried after the RFC formats. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%d %b %Y %H:%M:%S %z",
    "%a, %d %b %Y %H:%M %z",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Rewrites a compact `YYYYMMDDThhmmssZ` stamp as ISO-8601.
///
/// Returns `None` when `raw` does not have the compact shape.
#[must_use]
pub fn compact_to_iso(raw: &str) -> Option<String> {
    let caps = COMPACT_SEENDATE.captures(raw.trim())?;
    Some(format!(
        "{}-{}-{}T{}:{}:{}Z",
        &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6]
    ))
}

/// Parses a search-result `seendate`.
///
/// The compact form is matched explicitly and rewritten to ISO-8601 first;
/// anything else goes through [`parse_loose`].
#[must_use]
pub fn parse_seendate(raw: &str) -> Option<DateTime<Utc>> {
    match compact_to_iso(raw) {
        Some(iso) => DateTime::parse_from_rfc3339(&iso)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        None => parse_loose(raw),
    }
}

/// Best-effort parsing of the date formats seen in RSS and Atom feeds.
///
/// Tries RFC 3339, RFC 2822, a handful of common offset and offset-less
/// layouts, then bare dates (midnight UTC).
#[must_use]
pub fn parse_loose(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_seendate_matches_iso_rewrite() {
        for raw in ["20251202T224500Z", "20240229T000000Z", "19991231T235959Z"] {
            let iso = compact_to_iso(raw).expect("compact shape");
            let expected = DateTime::parse_from_rfc3339(&iso)
                .unwrap()
                .with_timezone(&Utc);
            assert_eq!(parse_seendate(raw), Some(expected), "seendate {raw}");
        }
    }

    #[test]
    fn compact_seendate_known_value() {
        assert_eq!(
            compact_to_iso("20251202T224500Z").as_deref(),
            Some("2025-12-02T22:45:00Z")
        );
        let dt = parse_seendate("20251202T224500Z").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_764_715_500_000);
    }

    #[test]
    fn compact_shape_with_impossible_date_is_none() {
        assert!(compact_to_iso("20251345T250000Z").is_some());
        assert_eq!(parse_seendate("20251345T250000Z"), None);
    }

    #[test]
    fn non_compact_seendate_falls_back_to_loose_parsing() {
        assert_eq!(compact_to_iso("2025-12-02T22:45:00Z"), None);
        let dt = parse_seendate("2025-12-02T22:45:00Z").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_764_715_500_000);
        assert_eq!(parse_seendate("garbage"), None);
        assert_eq!(parse_seendate(""), None);
    }

    #[test]
    fn loose_parses_rfc2822_with_named_zone() {
        let dt = parse_loose("Tue, 02 Dec 2025 22:45:00 GMT").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_764_715_500_000);
        let est = parse_loose("Tue, 02 Dec 2025 17:45:00 -0500").unwrap();
        assert_eq!(est, dt);
    }

    #[test]
    fn loose_parses_atom_and_naive_forms() {
        let atom = parse_loose("2025-12-02T23:45:00+01:00").unwrap();
        assert_eq!(atom.timestamp_millis(), 1_764_715_500_000);
        let naive = parse_loose("2025-12-02 22:45:00").unwrap();
        assert_eq!(naive.timestamp_millis(), 1_764_715_500_000);
        let date_only = parse_loose("2025-12-02").unwrap();
        assert_eq!(date_only.timestamp_millis(), 1_764_633_600_000);
    }

    #[test]
    fn loose_rejects_nonsense() {
        assert_eq!(parse_loose("yesterday-ish"), None);
        assert_eq!(parse_loose("   "), None);
    }
}
