//! # Remote Document-Store Backend
//!
//! Client for the hosted document-store Data API.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Data API Request Shape                               │
//! │                                                                         │
//! │  POST {base}/{action}          action ∈ find | updateOne | deleteOne   │
//! │  header: api-key: <credential>                                          │
//! │                                                                         │
//! │  {                                                                      │
//! │    "dataSource": "Cluster0",                                            │
//! │    "database":   "om_traders",                                          │
//! │    "collection": "products",                                            │
//! │    "filter":   { "id": "..." },          (updateOne/deleteOne)          │
//! │    "update":   { "$set": { ... } },      (updateOne)                    │
//! │    "upsert":   true                      (updateOne)                    │
//! │  }                                                                      │
//! │                                                                         │
//! │  Reads answer with  { "documents": [ ... ] }                            │
//! │  Mutations answer with an acknowledgment body (ignored beyond status)  │
//! │                                                                         │
//! │  The API also offers insertOne, but updateOne with upsert covers both  │
//! │  the insert and the replace half of every save, so inserts never need  │
//! │  their own action.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any transport error or non-2xx response surfaces as
//! [`StoreError::Remote`]; the fallback store absorbs it and retries the
//! operation against local persistence.
//!
//! No request timeout is configured here. A hung request rides the
//! runtime's own network timeout and then falls back like any other
//! failure.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use omtraders_core::{Category, Invoice, InvoiceStatus, Product};

use crate::backend::{StorageBackend, CATEGORIES, INVOICES, PRODUCTS};
use crate::config::RemoteConfig;
use crate::error::StoreResult;

// =============================================================================
// Wire Types
// =============================================================================

/// Request body shared by every Data API action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataApiRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upsert: Option<bool>,
}

/// Response body of a `find` action.
#[derive(Debug, Deserialize)]
struct FindResponse<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

// =============================================================================
// Remote Backend
// =============================================================================

/// Storage backend talking to the remote document store.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    config: RemoteConfig,
}

impl RemoteBackend {
    /// Creates a backend for the given remote configuration.
    pub fn new(config: RemoteConfig) -> Self {
        RemoteBackend {
            client: Client::new(),
            config,
        }
    }

    fn request<'a>(&'a self, collection: &'a str) -> DataApiRequest<'a> {
        DataApiRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection,
            filter: None,
            update: None,
            upsert: None,
        }
    }

    async fn post(&self, action: &str, body: &DataApiRequest<'_>) -> StoreResult<reqwest::Response> {
        let url = format!("{}/{}", self.config.endpoint.trim_end_matches('/'), action);
        debug!(action = %action, collection = %body.collection, "Data API request");

        let response = self
            .client
            .post(url)
            .header("api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        Ok(response.error_for_status()?)
    }

    async fn find<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let body = self.request(collection);
        let response = self.post("find", &body).await?;
        let found: FindResponse<T> = response.json().await?;
        Ok(found.documents)
    }

    async fn upsert_by_id<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> StoreResult<()> {
        let mut body = self.request(collection);
        body.filter = Some(json!({ "id": id }));
        body.update = Some(json!({ "$set": serde_json::to_value(doc)? }));
        body.upsert = Some(true);

        self.post("updateOne", &body).await?;
        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut body = self.request(collection);
        body.filter = Some(json!({ "id": id }));

        // deletedCount: 0 still answers 200, which is exactly the silent
        // no-op the contract asks for
        self.post("deleteOne", &body).await?;
        Ok(())
    }
}

impl StorageBackend for RemoteBackend {
    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        self.find(PRODUCTS).await
    }

    async fn save_product(&self, product: &Product) -> StoreResult<()> {
        self.upsert_by_id(PRODUCTS, &product.id, product).await
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id(PRODUCTS, id).await
    }

    async fn get_invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.find(INVOICES).await
    }

    async fn save_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        self.upsert_by_id(INVOICES, &invoice.id, invoice).await
    }

    async fn update_invoice_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()> {
        let mut body = self.request(INVOICES);
        body.filter = Some(json!({ "id": id }));
        body.update = Some(json!({ "$set": { "status": serde_json::to_value(status)? } }));

        // matchedCount: 0 answers 200 - unknown ids are a silent no-op
        self.post("updateOne", &body).await?;
        Ok(())
    }

    async fn get_categories(&self) -> StoreResult<Vec<Category>> {
        self.find(CATEGORIES).await
    }

    async fn save_category(&self, category: &Category) -> StoreResult<()> {
        self.upsert_by_id(CATEGORIES, &category.id, category).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
