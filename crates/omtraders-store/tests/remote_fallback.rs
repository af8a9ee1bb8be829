//! Remote Data API behavior and the fallback contract, against a mock
//! document-store endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

use omtraders_core::{InvoiceStatus, Money, Product};
use omtraders_store::{
    LocalBackend, RemoteBackend, RemoteConfig, RetailStore, StorageBackend, Store, StoreConfig,
};

fn temp_data_dir() -> PathBuf {
    init_tracing();
    std::env::temp_dir().join(format!("omtraders-remote-{}", uuid::Uuid::new_v4()))
}

/// Makes `RUST_LOG=omtraders_store=debug cargo test` show the fallback
/// decisions while the tests run.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pipe_product() -> Product {
    Product {
        id: "p-1".to_string(),
        name: "Pipe 2in".to_string(),
        description: "PVC pipe, 2 inch".to_string(),
        category: "PVC".to_string(),
        dimensions: "2in x 3m".to_string(),
        image_url: String::new(),
        price: Money::from_paise(15000),
        stock: 10,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn get_products_reads_documents_from_the_data_api() {
    let server = MockServer::start_async().await;

    let find = server.mock(|when, then| {
        when.method(POST)
            .path("/find")
            .header("api-key", "test-key")
            .json_body_partial(
                r#"{"dataSource": "Cluster0", "database": "om_traders", "collection": "products"}"#,
            );
        then.status(200)
            .json_body(json!({ "documents": [serde_json::to_value(pipe_product()).unwrap()] }));
    });

    let remote = RemoteBackend::new(RemoteConfig::new(server.base_url(), "test-key"));
    let products = remote.get_products().await.expect("find");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pipe 2in");
    assert_eq!(products[0].price, Money::from_paise(15000));
    find.assert();
}

#[tokio::test]
async fn save_product_issues_an_upsert_by_id() {
    let server = MockServer::start_async().await;

    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/updateOne")
            .header("api-key", "test-key")
            .json_body_partial(
                r#"{"collection": "products", "filter": {"id": "p-1"}, "upsert": true}"#,
            );
        then.status(200)
            .json_body(json!({ "matchedCount": 0, "upsertedId": "p-1" }));
    });

    let remote = RemoteBackend::new(RemoteConfig::new(server.base_url(), "test-key"));
    remote.save_product(&pipe_product()).await.expect("upsert");

    update.assert();
}

#[tokio::test]
async fn update_invoice_status_sets_only_the_status_field() {
    let server = MockServer::start_async().await;

    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/updateOne")
            .json_body_partial(
                r#"{"collection": "invoices", "filter": {"id": "i-1"}, "update": {"$set": {"status": "paid"}}}"#,
            );
        then.status(200).json_body(json!({ "matchedCount": 1 }));
    });

    let remote = RemoteBackend::new(RemoteConfig::new(server.base_url(), "test-key"));
    remote
        .update_invoice_status("i-1", InvoiceStatus::Paid)
        .await
        .expect("update status");

    update.assert();
}

#[tokio::test]
async fn non_2xx_responses_fall_back_to_local_persistence() {
    let server = MockServer::start_async().await;

    // The remote rejects everything - misconfigured credentials, outage,
    // it does not matter which
    server.mock(|when, then| {
        when.method(POST);
        then.status(500).body("upstream unavailable");
    });

    let config = StoreConfig::new(temp_data_dir())
        .with_remote(RemoteConfig::new(server.base_url(), "test-key"));
    let store = RetailStore::from_config(&config);

    // Every operation still completes, served by local persistence
    store.save_product(&pipe_product()).await.expect("save");
    let products = store.get_products().await.expect("read");
    assert_eq!(products.len(), 1);

    store.delete_product("p-1").await.expect("delete");
    assert!(store.get_products().await.expect("read").is_empty());

    assert!(store.is_using_fallback());
}

#[tokio::test]
async fn unreachable_endpoint_falls_back_to_local_persistence() {
    // Nothing listens here; connections are refused immediately
    let config = StoreConfig::new(temp_data_dir())
        .with_remote(RemoteConfig::new("http://127.0.0.1:9", "test-key"));
    let store = RetailStore::from_config(&config);

    store.save_product(&pipe_product()).await.expect("save");
    let products = store.get_products().await.expect("read");
    assert_eq!(products.len(), 1);
    assert!(store.is_using_fallback());
}

#[tokio::test]
async fn recovered_remote_clears_the_fallback_flag() {
    let server = MockServer::start_async().await;
    let data_dir = temp_data_dir();

    // First phase: the remote is down
    let mut outage = server.mock(|when, then| {
        when.method(POST);
        then.status(503);
    });

    let store = Store::new(
        Some(RemoteBackend::new(RemoteConfig::new(
            server.base_url(),
            "test-key",
        ))),
        LocalBackend::new(&data_dir),
    );

    store.save_product(&pipe_product()).await.expect("save");
    assert!(store.is_using_fallback());
    outage.delete();

    // Second phase: the remote answers again
    server.mock(|when, then| {
        when.method(POST).path("/find");
        then.status(200).json_body(json!({ "documents": [] }));
    });

    // The flag clears - but note the earlier write stays local only; there
    // is no reconciliation
    let remote_view = store.get_products().await.expect("read");
    assert!(remote_view.is_empty());
    assert!(!store.is_using_fallback());
}
