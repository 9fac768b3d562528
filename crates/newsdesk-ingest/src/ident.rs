//! Identifier derivation for normalized items.
//!
//! Search results and feed entries share no key space upstream, so ids are
//! built locally from a short content hash plus the category (and, for search
//! results, the position in the result list).

use newsdesk_core::Category;
use rand::distr::Alphanumeric;
use rand::Rng;

/// 32-bit rolling hash (`h * 31 + c`) over UTF-16 code units, rendered in
/// base 36.
///
/// Deterministic across processes and platforms; ids built from it are stable
/// for identical input.
#[must_use]
pub fn hash_code(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    to_base36(i64::from(hash).unsigned_abs())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        // value % 36 < 36, so the index is always in bounds
        #[allow(clippy::cast_possible_truncation)]
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Supplies the stand-in fingerprint for search articles without a URL.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> String;
}

/// Random lowercase alphanumeric tokens. Unique within a run, not stable
/// across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn token(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(11)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect()
    }
}

/// `gdelt-{category}-{fingerprint}-{index}`.
#[must_use]
pub fn search_item_id(
    category: Category,
    url: Option<&str>,
    index: usize,
    tokens: &dyn TokenSource,
) -> String {
    let fingerprint = match url {
        Some(u) if !u.is_empty() => hash_code(u),
        _ => tokens.token(),
    };
    format!("gdelt-{category}-{fingerprint}-{index}")
}

/// `rss-{category}-{hash}` where the hash covers the link, or the title and
/// date text when the entry has no link.
#[must_use]
pub fn feed_item_id(category: Category, link: &str, title: &str, date_or_timestamp: &str) -> String {
    let fingerprint = if link.is_empty() {
        hash_code(&format!("{title}-{date_or_timestamp}"))
    } else {
        hash_code(link)
    };
    format!("rss-{category}-{fingerprint}")
}
