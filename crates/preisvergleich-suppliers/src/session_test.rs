use reqwest::header::HeaderValue;

use super::*;

const FEGA_BASE: &str = "https://shop.example/scripts";

// -----------------------------------------------------------------------
// split_set_cookie_header
// -----------------------------------------------------------------------

#[test]
fn split_single_cookie_is_unchanged() {
    assert_eq!(
        split_set_cookie_header("PHPSESSID=abc123; path=/"),
        vec!["PHPSESSID=abc123; path=/"]
    );
}

#[test]
fn split_comma_joined_cookies() {
    let parts = split_set_cookie_header("PHPSESSID=abc; path=/, lang=de; path=/");
    assert_eq!(parts, vec!["PHPSESSID=abc; path=/", " lang=de; path=/"]);
}

#[test]
fn split_ignores_comma_inside_expires() {
    let parts = split_set_cookie_header(
        "PHPSESSID=abc; expires=Wed, 21 Oct 2026 07:28:00 GMT; path=/, shop_token=xyz",
    );
    assert_eq!(parts.len(), 2);
    assert!(parts[0].contains("21 Oct 2026"));
    assert_eq!(parts[1].trim(), "shop_token=xyz");
}

#[test]
fn split_accepts_dotted_cookie_names() {
    let parts = split_set_cookie_header("a=1, .AspNetCore.Session=CfDJ8; path=/");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].trim(), ".AspNetCore.Session=CfDJ8; path=/");
}

// -----------------------------------------------------------------------
// parse_cookie_pair
// -----------------------------------------------------------------------

#[test]
fn parse_pair_drops_attributes() {
    let cookie = parse_cookie_pair(" PHPSESSID = abc123 ; HttpOnly").unwrap();
    assert_eq!(cookie, Cookie::new("PHPSESSID", "abc123"));
}

#[test]
fn parse_pair_keeps_equals_in_value() {
    let cookie = parse_cookie_pair("token=a=b==; path=/").unwrap();
    assert_eq!(cookie.value, "a=b==");
}

#[test]
fn parse_pair_without_equals_is_skipped() {
    assert!(parse_cookie_pair("HttpOnly").is_none());
    assert!(parse_cookie_pair("=orphan").is_none());
}

// -----------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------

#[test]
fn merge_overrides_same_name_and_keeps_others() {
    let session = Session::new(SupplierId::Gautzsch, "https://portal.example")
        .merge([Cookie::new("a", "1"), Cookie::new("b", "2")])
        .merge([Cookie::new("b", "3"), Cookie::new("c", "4")]);
    assert_eq!(session.cookie_header(), "a=1; b=3; c=4");
}

#[test]
fn from_headers_collects_every_set_cookie_header() {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_static("PHPSESSID=abc; path=/"));
    headers.append(
        SET_COOKIE,
        HeaderValue::from_static("lang=de; expires=Wed, 21 Oct 2026 07:28:00 GMT, cart=0"),
    );
    let session = Session::from_headers(SupplierId::Fega, FEGA_BASE, &headers);
    assert_eq!(session.cookie_header(), "PHPSESSID=abc; lang=de; cart=0");
    assert_eq!(session.supplier(), SupplierId::Fega);
}

#[test]
fn from_headers_without_cookies_is_empty() {
    let session = Session::from_headers(SupplierId::Fega, FEGA_BASE, &HeaderMap::new());
    assert!(session.is_empty());
    assert_eq!(session.cookie_header(), "");
}

#[test]
fn ensure_supplier_rejects_foreign_session() {
    let session = Session::new(SupplierId::Fega, FEGA_BASE);
    let err = session.ensure_supplier(SupplierId::Gautzsch).unwrap_err();
    assert!(matches!(
        err,
        SupplierError::SessionMismatch {
            expected: SupplierId::Gautzsch,
            actual: SupplierId::Fega
        }
    ));
}

#[test]
fn debug_hides_cookie_values() {
    let session =
        Session::new(SupplierId::Fega, FEGA_BASE).merge([Cookie::new("PHPSESSID", "s3cr3t")]);
    let rendered = format!("{session:?}");
    assert!(rendered.contains("PHPSESSID"));
    assert!(!rendered.contains("s3cr3t"));
}
