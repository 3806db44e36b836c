//! End-to-end cart and checkout flows against a running storefront.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use tiendita_core::{InvoiceId, Price};
use tiendita_integration_tests::TestApp;

fn price(value: &Value) -> Price {
    serde_json::from_value(value.clone()).unwrap()
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_new_shopper_has_empty_cart() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    let cart: Value = shopper.get("/cart").await.json().await.unwrap();
    assert_eq!(cart["count"], 0);
    assert_eq!(cart["lines"], serde_json::json!([]));
    assert_eq!(price(&cart["total"]), Price::ZERO);
}

#[tokio::test]
async fn test_add_to_cart_keeps_duplicates_and_sums_total() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    let first = shopper.add_to_cart("1", "Shirt", "20").await;
    assert_eq!(first["notice"]["title"], "¡Producto agregado al carrito!");

    let second = shopper.add_to_cart("1", "Shirt", "20").await;
    assert_eq!(second["cart"]["count"], 2);
    assert_eq!(price(&second["cart"]["total"]), Price::from_units(40));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let app = TestApp::with_sample_catalog().await;
    let ana = app.shopper();
    let bob = app.shopper();

    ana.add_to_cart("1", "Shirt", "20").await;

    let cart: Value = bob.get("/cart").await.json().await.unwrap();
    assert_eq!(cart["count"], 0);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    shopper.add_to_cart("2", "Mug", "7.5").await;
    let resp = shopper.post_form("/cart/clear", &[]).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = shopper.get("/cart").await.json().await.unwrap();
    assert_eq!(cart["count"], 0);
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_then_search_by_email() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    shopper.add_to_cart("1", "Shirt", "20").await;
    shopper.add_to_cart("1", "Shirt", "20").await;

    let resp = shopper.checkout("Ana", "ana@x.com", "555").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();

    let id = body["invoice"]["id"].as_i64().unwrap();
    assert!((InvoiceId::MIN..=InvoiceId::MAX).contains(&id));
    assert_eq!(body["notice"]["kind"], "success");
    assert!(
        body["notice"]["message"]
            .as_str()
            .unwrap()
            .contains(&format!("Número de factura: {id}"))
    );
    assert_eq!(body["cart"]["count"], 0);

    let cart: Value = shopper.get("/cart").await.json().await.unwrap();
    assert_eq!(price(&cart["total"]), Price::ZERO);

    let found = shopper.search("ana@x.com").await;
    let invoices = found["invoices"].as_array().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["id"], id);
    assert_eq!(price(&invoices[0]["total"]), Price::from_units(40));

    let items = invoices[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["name"] == "Shirt"));
}

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected_without_writing() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();

    let resp = shopper.checkout("Ana", "ana@x.com", "555").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let notice: Value = resp.json().await.unwrap();
    assert_eq!(notice["kind"], "warning");
    assert_eq!(notice["title"], "Carrito vacío");
    assert_eq!(app.invoice_count().await, 0);
}

#[tokio::test]
async fn test_checkout_blank_field_keeps_cart() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    shopper.add_to_cart("1", "Shirt", "20").await;

    let resp = shopper.checkout("Ana", "ana@x.com", "   ").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let notice: Value = resp.json().await.unwrap();
    assert_eq!(notice["title"], "Datos del cliente incompletos");
    assert_eq!(app.invoice_count().await, 0);

    let cart: Value = shopper.get("/cart").await.json().await.unwrap();
    assert_eq!(cart["count"], 1);
}

#[tokio::test]
async fn test_checkout_stores_lowercased_contact() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    shopper.add_to_cart("2", "Mug", "7.5").await;

    let body: Value = shopper
        .checkout("Ana María", "Ana@X.com", "555-0100")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["invoice"]["name"], "ana maría");
    assert_eq!(body["invoice"]["email"], "ana@x.com");
    assert_eq!(body["invoice"]["phone"], "555-0100");
}

#[tokio::test]
async fn test_invoice_detail() {
    let app = TestApp::with_sample_catalog().await;
    let shopper = app.shopper();
    shopper.add_to_cart("2", "Mug", "7.5").await;

    let body: Value = shopper
        .checkout("Bob", "bob@x.com", "777")
        .await
        .json()
        .await
        .unwrap();
    let id = body["invoice"]["id"].as_i64().unwrap();

    let resp = shopper.get(&format!("/invoices/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let invoice: Value = resp.json().await.unwrap();
    assert_eq!(invoice["name"], "bob");
    assert_eq!(price(&invoice["total"]), Price::new("7.5".parse().unwrap()));

    let resp = shopper.get("/invoices/42").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
