//! Serde types for the Gautzsch portal's article search JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One element of the `OxomiArticleSearch` response array.
///
/// Every field is optional; the portal omits or nulls fields freely and is
/// inconsistent about numbers versus strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GautzschArticle {
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub manufacturer_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_number: Option<String>,
    /// Number or string, possibly with a decimal comma.
    #[serde(default)]
    pub quantity_single_price: Option<Value>,
    /// Number or string.
    #[serde(default)]
    pub price_unit: Option<Value>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price_quantity_unit: Option<String>,
    /// Free text such as `"120 M"`. The misspelling is the portal's.
    #[serde(default, deserialize_with = "string_or_number")]
    pub availabel_order_quantity: Option<String>,
    #[serde(default)]
    pub is_orderable: Option<bool>,
}

/// Accepts a JSON string or number as text; anything else becomes `None`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_portal_shape() {
        let article: GautzschArticle = serde_json::from_str(
            r#"{
                "productName": "NYM-J 3x1,5",
                "manufacturerName": "Lapp",
                "productNumber": 123456,
                "quantitySinglePrice": "45,90",
                "priceUnit": 100,
                "priceQuantityUnit": "M",
                "availabelOrderQuantity": "500 M",
                "isOrderable": true,
                "somethingElse": [1, 2]
            }"#,
        )
        .unwrap();
        assert_eq!(article.product_name.as_deref(), Some("NYM-J 3x1,5"));
        assert_eq!(article.product_number.as_deref(), Some("123456"));
        assert_eq!(article.quantity_single_price, Some(Value::from("45,90")));
        assert_eq!(article.price_unit, Some(Value::from(100)));
        assert_eq!(article.is_orderable, Some(true));
    }

    #[test]
    fn missing_and_null_fields_are_none() {
        let article: GautzschArticle =
            serde_json::from_str(r#"{"productName": null, "isOrderable": null}"#).unwrap();
        assert!(article.product_name.is_none());
        assert!(article.is_orderable.is_none());
        assert!(article.quantity_single_price.is_none());
    }
}
