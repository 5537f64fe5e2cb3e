use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One supplier's answer for one EAN, normalized across supplier formats.
///
/// `price` is `None` whenever the supplier did not deliver a parseable,
/// positive price. A `None` price is "unknown", never "free".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_name: Option<String>,
    pub manufacturer: Option<String>,
    pub article_number: Option<String>,
    /// Net price per `price_unit` pieces, serialized as a decimal string.
    pub price: Option<Decimal>,
    /// Number of pieces the price refers to (e.g. `100` for "per 100 m").
    pub price_unit: u32,
    /// Unit label for `price_unit` (e.g. `"M"`); only set when `price_unit != 1`.
    pub price_unit_label: Option<String>,
    /// `true` only when a positive stock or order-quantity signal was parsed.
    pub available: bool,
    pub delivery_days: Option<u32>,
}

impl ProductRecord {
    /// The all-null, unavailable record used for unconfigured suppliers,
    /// "not found" results, and downgraded supplier failures.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            product_name: None,
            manufacturer: None,
            article_number: None,
            price: None,
            price_unit: 1,
            price_unit_label: None,
            available: false,
            delivery_days: None,
        }
    }

    /// Returns `true` if no field carries supplier data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Returns the price when it is set and strictly positive.
    #[must_use]
    pub fn valid_price(&self) -> Option<Decimal> {
        self.price.filter(|p| p.is_sign_positive() && !p.is_zero())
    }
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn empty_record_has_unit_one_and_is_unavailable() {
        let record = ProductRecord::empty();
        assert_eq!(record.price_unit, 1);
        assert!(!record.available);
        assert!(record.price.is_none());
        assert!(record.is_empty());
    }

    #[test]
    fn zero_price_is_not_a_valid_price() {
        let record = ProductRecord {
            price: Some(Decimal::ZERO),
            ..ProductRecord::empty()
        };
        assert!(record.valid_price().is_none());
    }

    #[test]
    fn serializes_camel_case_with_string_price() {
        let record = ProductRecord {
            article_number: Some("0546".to_owned()),
            price: Some(Decimal::from_str("12.50").unwrap()),
            available: true,
            ..ProductRecord::empty()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["articleNumber"], "0546");
        assert_eq!(value["price"], "12.50");
        assert_eq!(value["priceUnit"], 1);
        assert_eq!(value["available"], true);
        assert!(value["deliveryDays"].is_null());
    }
}
