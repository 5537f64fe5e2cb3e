//! Supplier sessions: cookie accumulation across login responses.
//!
//! A [`Session`] is created fresh for every comparison and dropped with it.
//! Cookies are kept in first-seen order; [`Session::merge`] lets newer values
//! override same-named older ones without touching any other cookie.

use chrono::{DateTime, Utc};
use preisvergleich_core::SupplierId;
use reqwest::header::{HeaderMap, SET_COOKIE};

use crate::error::SupplierError;

/// One `name=value` pair taken from a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Authenticated context for exactly one supplier.
#[derive(Clone)]
pub struct Session {
    supplier: SupplierId,
    base_url: String,
    cookies: Vec<Cookie>,
    created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(supplier: SupplierId, base_url: impl Into<String>) -> Self {
        Self {
            supplier,
            base_url: base_url.into(),
            cookies: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Starts a session from every cookie set by a response.
    #[must_use]
    pub fn from_headers(
        supplier: SupplierId,
        base_url: impl Into<String>,
        headers: &HeaderMap,
    ) -> Self {
        Self::new(supplier, base_url).merge(cookies_from_headers(headers))
    }

    /// Returns a session where each cookie in `newer` replaces the same-named
    /// cookie in place, or is appended if the name is new.
    #[must_use]
    pub fn merge(mut self, newer: impl IntoIterator<Item = Cookie>) -> Self {
        for cookie in newer {
            match self.cookies.iter_mut().find(|c| c.name == cookie.name) {
                Some(existing) => existing.value = cookie.value,
                None => self.cookies.push(cookie),
            }
        }
        self
    }

    /// Merges every cookie set by a response into this session.
    #[must_use]
    pub fn merge_headers(self, headers: &HeaderMap) -> Self {
        self.merge(cookies_from_headers(headers))
    }

    /// Renders the `Cookie` request header value, e.g. `"PHPSESSID=abc; lang=de"`.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    #[must_use]
    pub fn supplier(&self) -> SupplierId {
        self.supplier
    }

    /// Shop root the session was established against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Fails unless this session was issued by `expected`.
    pub(crate) fn ensure_supplier(&self, expected: SupplierId) -> Result<(), SupplierError> {
        if self.supplier == expected {
            Ok(())
        } else {
            Err(SupplierError::SessionMismatch {
                expected,
                actual: self.supplier,
            })
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.cookies.iter().map(|c| c.name.as_str()).collect();
        f.debug_struct("Session")
            .field("supplier", &self.supplier)
            .field("base_url", &self.base_url)
            .field("cookies", &names)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Collects the cookies of every `Set-Cookie` header, in header order.
#[must_use]
pub fn cookies_from_headers(headers: &HeaderMap) -> Vec<Cookie> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(split_set_cookie_header)
        .filter_map(parse_cookie_pair)
        .collect()
}

/// Splits a `Set-Cookie` value that may hold several comma-joined cookies.
///
/// A comma only starts a new cookie when it is followed by optional
/// whitespace, a cookie-name token and `=`. Commas inside attribute values
/// (`Expires=Wed, 21 Oct 2026 07:28:00 GMT`) do not split.
#[must_use]
pub fn split_set_cookie_header(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;

    for (idx, _) in value.match_indices(',') {
        if starts_cookie_pair(&value[idx + 1..]) {
            parts.push(&value[start..idx]);
            start = idx + 1;
        }
    }
    parts.push(&value[start..]);
    parts
}

fn starts_cookie_pair(rest: &str) -> bool {
    let rest = rest.trim_start();
    let name_len = rest
        .find(|c: char| !is_cookie_name_char(c))
        .unwrap_or(rest.len());
    name_len > 0 && rest[name_len..].starts_with('=')
}

fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Extracts `name=value` from one cookie definition, ignoring attributes.
///
/// Returns `None` when there is no `=` before the first `;` or the name is
/// empty.
#[must_use]
pub fn parse_cookie_pair(segment: &str) -> Option<Cookie> {
    let pair = segment.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Cookie::new(name, value.trim()))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
