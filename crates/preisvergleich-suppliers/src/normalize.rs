//! Maps supplier-native search hits onto [`ProductRecord`].
//!
//! Both normalizers are pure. Anything unparseable becomes `None` rather
//! than a guessed value; a missing price is never reported as zero.

use std::str::FromStr;
use std::sync::LazyLock;

use preisvergleich_core::ProductRecord;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::fega::FegaRawItem;
use crate::gautzsch::GautzschArticle;
use crate::html::clean_text;

/// Product-name patterns on Fega search pages, most specific first.
static FEGA_NAME_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?is)<p[^>]*class="bold nomargin"[^>]*>(.*?)</p>"#)
            .expect("valid fega name regex"),
        Regex::new(r#"(?is)<div[^>]*class="art-name[^"]*\bbold\b[^"]*"[^>]*>(.*?)</div>"#)
            .expect("valid fega name regex"),
        Regex::new(r#"(?is)<div[^>]*class="art-name[^"]*"[^>]*>(.*?)</div>"#)
            .expect("valid fega name regex"),
    ]
});

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid leading integer regex"));

static LEADING_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?").expect("valid leading decimal regex"));

/// Normalizes the first Fega basket record.
///
/// Fega never reports a manufacturer, delivery time or price unit, and the
/// product name always has a value.
#[must_use]
pub fn normalize_fega(raw: &FegaRawItem, ean: &str) -> ProductRecord {
    let record = &raw.record;

    let price = record.meta("preis-vk").and_then(parse_price);
    let available = ["verf_zl", "verf_lg"]
        .iter()
        .filter_map(|key| record.meta(key))
        .any(is_positive_count);

    let product_name = fega_product_name(&raw.html).unwrap_or_else(|| {
        let id = record.article_number.as_deref().unwrap_or(ean);
        format!("Artikel {id}")
    });

    ProductRecord {
        product_name: Some(product_name),
        article_number: record.article_number.clone(),
        price,
        available,
        ..ProductRecord::empty()
    }
}

fn fega_product_name(html: &str) -> Option<String> {
    FEGA_NAME_RES.iter().find_map(|re| {
        re.captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| clean_text(m.as_str()))
            .find(|name| !name.is_empty())
    })
}

/// Normalizes the first Gautzsch search hit.
///
/// Returns `None` when the hit carries neither a name, an article number
/// nor a price.
#[must_use]
pub fn normalize_gautzsch(article: &GautzschArticle) -> Option<ProductRecord> {
    let product_name = non_blank(article.product_name.as_deref())
        .or_else(|| non_blank(article.product_description.as_deref()));
    let manufacturer = non_blank(article.manufacturer_name.as_deref())
        .or_else(|| non_blank(article.manufacturer.as_deref()));
    let article_number = non_blank(article.product_number.as_deref());
    let price = article.quantity_single_price.as_ref().and_then(value_price);

    if product_name.is_none() && article_number.is_none() && price.is_none() {
        return None;
    }

    let price_unit = article
        .price_unit
        .as_ref()
        .and_then(value_price)
        .and_then(|unit| unit.to_u32())
        .filter(|unit| *unit > 0)
        .unwrap_or(1);
    let price_unit_label = if price_unit == 1 {
        None
    } else {
        non_blank(article.price_quantity_unit.as_deref())
    };

    let available = match non_blank(article.availabel_order_quantity.as_deref()) {
        Some(quantity) => is_positive_quantity(&quantity),
        None => article.is_orderable.unwrap_or(false),
    };

    Some(ProductRecord {
        product_name,
        manufacturer,
        article_number,
        price,
        price_unit,
        price_unit_label,
        available,
        delivery_days: None,
    })
}

/// Parses a price written with either decimal separator. Non-positive and
/// unparseable values yield `None`.
pub(crate) fn parse_price(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
        .filter(|p| p.is_sign_positive() && !p.is_zero())
}

fn value_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_price(&n.to_string()),
        Value::String(s) => parse_price(s),
        _ => None,
    }
}

/// Stock counts are read up to the first non-digit, so `4000.0000` counts
/// as `4000`.
fn is_positive_count(raw: &str) -> bool {
    LEADING_INT_RE
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .is_some_and(|n| n > 0)
}

/// `"120 M"` style quantities: everything but digits and `.` is dropped,
/// then the leading `digits[.digits]` run is read (`"1.000.000"` is `1.000`).
fn is_positive_quantity(raw: &str) -> bool {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    LEADING_DECIMAL_RE
        .find(&digits)
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
        .is_some_and(|q| q.is_sign_positive() && !q.is_zero())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
