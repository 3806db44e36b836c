//! Invoice search over HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use tiendita_integration_tests::{Shopper, TestApp};

async fn buy(shopper: &Shopper, name: &str, email: &str, phone: &str) -> i64 {
    shopper.add_to_cart("1", "Shirt", "20").await;
    let body: Value = shopper
        .checkout(name, email, phone)
        .await
        .json()
        .await
        .unwrap();
    body["invoice"]["id"].as_i64().unwrap()
}

fn ids(found: &Value) -> Vec<i64> {
    found["invoices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|invoice| invoice["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_search_ignores_case() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    let id = buy(&shopper, "Ana", "ana@x.com", "555").await;

    let found = shopper.search("ANA@X.COM").await;
    assert_eq!(ids(&found), vec![id]);
    assert_eq!(found["notice"]["title"], "Facturas encontradas");
}

#[tokio::test]
async fn test_search_by_phone_and_name() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    let id = buy(&shopper, "Ana", "ana@x.com", "555").await;

    assert_eq!(ids(&shopper.search("555").await), vec![id]);
    assert_eq!(ids(&shopper.search("ana").await), vec![id]);
}

#[tokio::test]
async fn test_search_returns_every_invoice_for_a_name() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    let first = buy(&shopper, "Ana", "ana@x.com", "555").await;
    let second = buy(&shopper, "Ana", "ana@y.com", "556").await;

    let mut found = ids(&shopper.search("ana").await);
    found.sort_unstable();

    let mut expected = vec![first, second];
    expected.sort_unstable();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_search_is_visible_to_other_shoppers() {
    let app = TestApp::with_sample_catalog().await;
    let id = buy(&app.shopper(), "Ana", "ana@x.com", "555").await;

    assert_eq!(ids(&app.shopper().search("ana@x.com").await), vec![id]);
}

#[tokio::test]
async fn test_search_without_match_warns() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    buy(&shopper, "Ana", "ana@x.com", "555").await;

    let found = shopper.search("zzz").await;
    assert!(ids(&found).is_empty());
    assert_eq!(found["notice"]["kind"], "warning");
    assert_eq!(found["notice"]["title"], "Factura no encontrada");
}

#[tokio::test]
async fn test_search_partial_value_does_not_match() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    buy(&shopper, "Ana", "ana@x.com", "555").await;

    assert!(ids(&shopper.search("ana@").await).is_empty());
}

#[tokio::test]
async fn test_blank_search_is_rejected() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    let resp = shopper.get("/invoices/search?q=%20%20").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let notice: Value = resp.json().await.unwrap();
    assert_eq!(notice["title"], "Campo de búsqueda vacío");
}
