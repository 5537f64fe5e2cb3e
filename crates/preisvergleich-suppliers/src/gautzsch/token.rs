use std::sync::LazyLock;

use regex::Regex;

use crate::html::extract_attr;

pub(crate) const TOKEN_FIELD: &str = "__RequestVerificationToken";

const META_TOKEN_NAMES: [&str; 3] = [TOKEN_FIELD, "csrf-token", "RequestVerificationToken"];

static INPUT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<input\b[^>]*>").expect("valid input tag regex"));

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta tag regex"));

/// Finds the anti-forgery token on the login page.
///
/// The hidden form field wins over `<meta>` tags; attribute order inside a
/// tag does not matter.
pub(crate) fn extract_antiforgery_token(html: &str) -> Option<String> {
    let from_input = INPUT_TAG_RE
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| extract_attr(tag, "name").as_deref() == Some(TOKEN_FIELD))
        .find_map(|tag| extract_attr(tag, "value"));

    from_input
        .or_else(|| {
            META_TAG_RE
                .find_iter(html)
                .map(|m| m.as_str())
                .filter(|tag| {
                    extract_attr(tag, "name")
                        .is_some_and(|name| META_TOKEN_NAMES.contains(&name.as_str()))
                })
                .find_map(|tag| extract_attr(tag, "content"))
        })
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}
