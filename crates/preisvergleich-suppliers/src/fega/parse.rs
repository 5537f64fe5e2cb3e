//! Parsing of the `data-addtobasket` attributes on Fega search pages.
//!
//! Observed format (one attribute per matched article):
//!
//! ```text
//! 054678|MC_1_215555422|||||0.1800|0||kzrume:0,verf_zl:4000,preis-vk:18
//! ```
//!
//! Fields are pipe-separated. Field 0 is the article number; the last
//! non-empty field after it is a comma-separated `key:value` metadata blob. Prices in the blob may use
//! a decimal comma (`preis-vk:12,50`), so a comma only starts a new pair when
//! it is followed by another `key:`.

use std::sync::LazyLock;

use regex::Regex;

use crate::html::decode_entities;

static ADD_TO_BASKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-addtobasket\s*=\s*"([^"]+)""#).expect("valid addtobasket regex")
});

/// One pipe-delimited basket record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketRecord {
    pub article_number: Option<String>,
    /// Metadata pairs in source order; keys are unique (last one wins).
    pub metadata: Vec<(String, String)>,
}

impl BasketRecord {
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Returns every basket record on the page, in document order.
pub(crate) fn extract_basket_records(html: &str) -> Vec<BasketRecord> {
    ADD_TO_BASKET_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| parse_basket_record(&decode_entities(m.as_str())))
        .collect()
}

/// Parses one raw `data-addtobasket` value.
#[must_use]
pub fn parse_basket_record(raw: &str) -> BasketRecord {
    let fields: Vec<&str> = raw.split('|').collect();

    let article_number = fields
        .first()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_owned);

    // Field 0 is never metadata; trailing empty fields are skipped.
    let metadata = fields
        .iter()
        .skip(1)
        .rev()
        .find(|f| !f.trim().is_empty())
        .map(|blob| parse_metadata(blob))
        .unwrap_or_default();

    BasketRecord {
        article_number,
        metadata,
    }
}

/// Splits `kzrume:0,verf_zl:10,preis-vk:12,50` into key/value pairs.
///
/// Each pair is split on its first `:` only. A comma-separated fragment
/// without its own `key:` prefix is re-attached to the previous value.
fn parse_metadata(blob: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for part in blob.split(',') {
        match split_pair(part) {
            Some((key, value)) => {
                if let Some(existing) = pairs.iter_mut().find(|(k, _)| *k == key) {
                    existing.1 = value;
                } else {
                    pairs.push((key, value));
                }
            }
            None => {
                if let Some((_, last)) = pairs.last_mut() {
                    last.push(',');
                    last.push_str(part);
                }
            }
        }
    }

    pairs
}

fn split_pair(part: &str) -> Option<(String, String)> {
    let (key, value) = part.split_once(':')?;
    let key = key.trim();
    let is_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
    is_key.then(|| (key.to_owned(), value.to_owned()))
}
