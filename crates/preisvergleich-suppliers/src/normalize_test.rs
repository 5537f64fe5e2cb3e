use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use super::*;
use crate::fega::parse::parse_basket_record;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn fega_item(record: &str, html: &str) -> FegaRawItem {
    FegaRawItem {
        record: parse_basket_record(record),
        html: html.to_owned(),
    }
}

fn gautzsch(value: serde_json::Value) -> GautzschArticle {
    serde_json::from_value(value).unwrap()
}

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn parse_price_accepts_decimal_comma_and_point() {
    assert_eq!(parse_price("12,50"), Some(dec("12.50")));
    assert_eq!(parse_price(" 9.99 "), Some(dec("9.99")));
    assert_eq!(parse_price("18"), Some(dec("18")));
}

#[test]
fn parse_price_rejects_zero_negative_and_garbage() {
    assert_eq!(parse_price("0"), None);
    assert_eq!(parse_price("0,00"), None);
    assert_eq!(parse_price("-3,10"), None);
    assert_eq!(parse_price("auf Anfrage"), None);
    assert_eq!(parse_price(""), None);
}

// -----------------------------------------------------------------------
// Fega
// -----------------------------------------------------------------------

#[test]
fn fega_record_with_decimal_comma_price() {
    let item = fega_item("0546|x||kzrume:0,verf_zl:10,preis-vk:12,50", "");
    let record = normalize_fega(&item, "4012345678901");
    assert_eq!(record.article_number.as_deref(), Some("0546"));
    assert_eq!(record.price, Some(dec("12.50")));
    assert!(record.available);
    assert_eq!(record.price_unit, 1);
    assert!(record.manufacturer.is_none());
    assert!(record.delivery_days.is_none());
}

#[test]
fn fega_available_via_verf_lg() {
    let item = fega_item("1|x||verf_zl:0,verf_lg:3,preis-vk:1", "");
    assert!(normalize_fega(&item, "1").available);
}

#[test]
fn fega_unavailable_without_positive_stock() {
    let item = fega_item("1|x||verf_zl:0,verf_lg:abc,preis-vk:1", "");
    assert!(!normalize_fega(&item, "1").available);
}

#[test]
fn fega_stock_count_reads_leading_integer() {
    let item = fega_item("1|x||verf_zl:4000.0000,preis-vk:1", "");
    assert!(normalize_fega(&item, "1").available);

    let zero = fega_item("1|x||verf_zl:0.5000,verf_lg:-3,preis-vk:1", "");
    assert!(!normalize_fega(&zero, "1").available);
}

#[test]
fn fega_trailing_pipe_keeps_metadata() {
    let item = fega_item("054678|x||verf_zl:3,preis-vk:5,20|", "");
    let record = normalize_fega(&item, "1");
    assert_eq!(record.price, Some(dec("5.20")));
    assert!(record.available);
}

#[test]
fn fega_zero_price_is_unknown() {
    let item = fega_item("1|x||verf_zl:1,preis-vk:0", "");
    assert!(normalize_fega(&item, "1").price.is_none());
}

#[test]
fn fega_name_prefers_bold_nomargin_paragraph() {
    let html = r#"
        <div class="art-name">Fallback Name</div>
        <p class="bold nomargin">Schuko-Steckdose <b>reinweiß</b></p>
    "#;
    let record = normalize_fega(&fega_item("1|x||preis-vk:2", html), "1");
    assert_eq!(record.product_name.as_deref(), Some("Schuko-Steckdose reinweiß"));
}

#[test]
fn fega_name_from_bold_art_name_before_plain() {
    let html = r#"
        <div class="art-name small">Plain</div>
        <div class="art-name text bold">Abzweigdose &amp; Deckel</div>
    "#;
    let record = normalize_fega(&fega_item("1|x||preis-vk:2", html), "1");
    assert_eq!(record.product_name.as_deref(), Some("Abzweigdose & Deckel"));
}

#[test]
fn fega_name_from_plain_art_name() {
    let html = r#"<div class="art-name">  Kabelbinder   200mm </div>"#;
    let record = normalize_fega(&fega_item("1|x||preis-vk:2", html), "1");
    assert_eq!(record.product_name.as_deref(), Some("Kabelbinder 200mm"));
}

#[test]
fn fega_name_skips_empty_matches() {
    let html = r#"<p class="bold nomargin"> </p><div class="art-name">Echter Name</div>"#;
    let record = normalize_fega(&fega_item("1|x||preis-vk:2", html), "1");
    assert_eq!(record.product_name.as_deref(), Some("Echter Name"));
}

#[test]
fn fega_name_falls_back_to_article_number_then_ean() {
    let with_number = normalize_fega(&fega_item("054678|x||preis-vk:2", ""), "4012345678901");
    assert_eq!(with_number.product_name.as_deref(), Some("Artikel 054678"));

    let without_number = normalize_fega(&fega_item("|x||preis-vk:2", ""), "4012345678901");
    assert_eq!(
        without_number.product_name.as_deref(),
        Some("Artikel 4012345678901")
    );
}

// -----------------------------------------------------------------------
// Gautzsch
// -----------------------------------------------------------------------

#[test]
fn gautzsch_string_price_with_zero_quantity() {
    let article = gautzsch(json!({
        "productNumber": "X1",
        "quantitySinglePrice": "9.99",
        "availabelOrderQuantity": "0 M"
    }));
    let record = normalize_gautzsch(&article).unwrap();
    assert_eq!(record.article_number.as_deref(), Some("X1"));
    assert_eq!(record.price, Some(dec("9.99")));
    assert!(!record.available);
    assert_eq!(record.price_unit, 1);
}

#[test]
fn gautzsch_numeric_price_and_unit_label() {
    let article = gautzsch(json!({
        "productName": "NYM-J 3x1,5",
        "manufacturerName": "Lapp",
        "productNumber": "100200",
        "quantitySinglePrice": 45.9,
        "priceUnit": "100",
        "priceQuantityUnit": "M",
        "availabelOrderQuantity": "1.500 M"
    }));
    let record = normalize_gautzsch(&article).unwrap();
    assert_eq!(record.product_name.as_deref(), Some("NYM-J 3x1,5"));
    assert_eq!(record.manufacturer.as_deref(), Some("Lapp"));
    assert_eq!(record.price, Some(dec("45.9")));
    assert_eq!(record.price_unit, 100);
    assert_eq!(record.price_unit_label.as_deref(), Some("M"));
    assert!(record.available);
}

#[test]
fn gautzsch_decimal_comma_price() {
    let article = gautzsch(json!({"productNumber": "1", "quantitySinglePrice": "3,25"}));
    assert_eq!(normalize_gautzsch(&article).unwrap().price, Some(dec("3.25")));
}

#[test]
fn gautzsch_label_hidden_for_unit_one() {
    let article = gautzsch(json!({
        "productNumber": "1",
        "priceUnit": 1,
        "priceQuantityUnit": "ST"
    }));
    let record = normalize_gautzsch(&article).unwrap();
    assert_eq!(record.price_unit, 1);
    assert!(record.price_unit_label.is_none());
}

#[test]
fn gautzsch_bad_unit_defaults_to_one() {
    for unit in [json!(0), json!(-5), json!("abc"), json!(null)] {
        let article = gautzsch(json!({"productNumber": "1", "priceUnit": unit}));
        assert_eq!(normalize_gautzsch(&article).unwrap().price_unit, 1);
    }
}

#[test]
fn gautzsch_fallback_fields() {
    let article = gautzsch(json!({
        "productName": "  ",
        "productDescription": "Leitungsschutzschalter B16",
        "manufacturer": "Hager"
    }));
    let record = normalize_gautzsch(&article).unwrap();
    assert_eq!(
        record.product_name.as_deref(),
        Some("Leitungsschutzschalter B16")
    );
    assert_eq!(record.manufacturer.as_deref(), Some("Hager"));
}

#[test]
fn gautzsch_is_orderable_used_only_without_quantity() {
    let orderable = gautzsch(json!({"productNumber": "1", "isOrderable": true}));
    assert!(normalize_gautzsch(&orderable).unwrap().available);

    let quantity_wins = gautzsch(json!({
        "productNumber": "1",
        "isOrderable": true,
        "availabelOrderQuantity": "0"
    }));
    assert!(!normalize_gautzsch(&quantity_wins).unwrap().available);

    let neither = gautzsch(json!({"productNumber": "1"}));
    assert!(!normalize_gautzsch(&neither).unwrap().available);
}

#[test]
fn gautzsch_quantity_with_thousands_dots_is_available() {
    let article = gautzsch(json!({
        "productNumber": "1",
        "availabelOrderQuantity": "1.000.000 Stk"
    }));
    assert!(normalize_gautzsch(&article).unwrap().available);

    let fractional_zero = gautzsch(json!({
        "productNumber": "1",
        "availabelOrderQuantity": "0.000 M"
    }));
    assert!(!normalize_gautzsch(&fractional_zero).unwrap().available);
}

#[test]
fn gautzsch_non_positive_price_is_unknown() {
    let article = gautzsch(json!({"productNumber": "1", "quantitySinglePrice": 0}));
    assert!(normalize_gautzsch(&article).unwrap().price.is_none());
}

#[test]
fn gautzsch_record_without_identity_or_price_is_discarded() {
    let article = gautzsch(json!({
        "manufacturerName": "Lapp",
        "quantitySinglePrice": "n/a",
        "isOrderable": true
    }));
    assert!(normalize_gautzsch(&article).is_none());
}
