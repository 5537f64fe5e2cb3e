//! Small regex-based HTML helpers shared by both supplier integrations.
//!
//! Supplier pages are scraped defensively: no DOM, just the handful of
//! patterns the shops are known to emit.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// Removes tags, decodes entities and collapses whitespace.
pub(crate) fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes the entities German shop templates actually use.
///
/// `&amp;` is decoded last so that `&amp;lt;` stays a literal `&lt;`.
pub(crate) fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&auml;", "ä")
        .replace("&ouml;", "ö")
        .replace("&uuml;", "ü")
        .replace("&Auml;", "Ä")
        .replace("&Ouml;", "Ö")
        .replace("&Uuml;", "Ü")
        .replace("&szlig;", "ß")
        .replace("&euro;", "€")
        .replace("&amp;", "&")
}

/// Reads a quoted attribute (`name="…"` or `name='…'`) from a single tag.
pub(crate) fn extract_attr(tag: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|[\s<]){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| decode_entities(m.as_str()))
}
