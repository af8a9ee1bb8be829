//! # Local Persistence Backend
//!
//! A key-value persistence area keyed by collection name: one JSON file per
//! collection under a data directory.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Local Persistence Area                               │
//! │                                                                         │
//! │  {data_dir}/                                                            │
//! │  ├── products.json     [ {"id": "...", "name": "...", ...}, ... ]      │
//! │  ├── invoices.json     [ {"id": "...", "items": [...], ...}, ... ]     │
//! │  └── categories.json   [ {"id": "...", "name": "..."}, ... ]           │
//! │                                                                         │
//! │  Read  = deserialize-or-empty-sequence                                  │
//! │  Write = read all → splice/replace by id or append → write whole file  │
//! │                                                                         │
//! │  A missing, corrupt, or unparsable file reads as an EMPTY collection,  │
//! │  never an error. Losing a corrupt file beats refusing to start.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whole-collection read-modify-write is acceptable at this scale (a small
//! shop's catalog); a mutex serializes the cycles so concurrent saves cannot
//! interleave between read and write.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use omtraders_core::{Category, Invoice, InvoiceStatus, Product};

use crate::backend::{StorageBackend, CATEGORIES, INVOICES, PRODUCTS};
use crate::error::StoreResult;

/// File-backed storage backend.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    dir: PathBuf,
    /// Serializes read-modify-write cycles across clones.
    write_lock: Arc<Mutex<()>>,
}

impl LocalBackend {
    /// Creates a backend rooted at the given data directory.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalBackend {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Reads a whole collection.
    ///
    /// Missing, unreadable or unparsable files all read as empty - the
    /// contract says reads never fail.
    async fn read_collection<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = %collection, "Collection file absent, treating as empty");
                return Vec::new();
            }
            Err(err) => {
                warn!(collection = %collection, error = %err, "Failed to read collection file, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(docs) => docs,
            Err(err) => {
                warn!(collection = %collection, error = %err, "Collection file unparsable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Writes a whole collection, creating the data directory if needed.
    async fn write_collection<T: Serialize>(
        &self,
        collection: &str,
        docs: &[T],
    ) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let bytes = serde_json::to_vec_pretty(docs)?;
        tokio::fs::write(self.collection_path(collection), bytes).await?;
        Ok(())
    }
}

impl StorageBackend for LocalBackend {
    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read_collection(PRODUCTS).await)
    }

    async fn save_product(&self, product: &Product) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut products: Vec<Product> = self.read_collection(PRODUCTS).await;
        match products.iter().position(|p| p.id == product.id) {
            Some(pos) => products[pos] = product.clone(),
            None => products.push(product.clone()),
        }

        self.write_collection(PRODUCTS, &products).await
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut products: Vec<Product> = self.read_collection(PRODUCTS).await;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            // Absent id: nothing to do, and not an error
            debug!(id = %id, "delete_product: no such product");
            return Ok(());
        }

        self.write_collection(PRODUCTS, &products).await
    }

    async fn get_invoices(&self) -> StoreResult<Vec<Invoice>> {
        Ok(self.read_collection(INVOICES).await)
    }

    async fn save_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut invoices: Vec<Invoice> = self.read_collection(INVOICES).await;
        match invoices.iter().position(|i| i.id == invoice.id) {
            Some(pos) => invoices[pos] = invoice.clone(),
            None => invoices.push(invoice.clone()),
        }

        self.write_collection(INVOICES, &invoices).await
    }

    async fn update_invoice_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut invoices: Vec<Invoice> = self.read_collection(INVOICES).await;
        match invoices.iter().position(|i| i.id == id) {
            Some(pos) => {
                invoices[pos].status = status;
                self.write_collection(INVOICES, &invoices).await
            }
            None => {
                debug!(id = %id, "update_invoice_status: no such invoice");
                Ok(())
            }
        }
    }

    async fn get_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read_collection(CATEGORIES).await)
    }

    async fn save_category(&self, category: &Category) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut categories: Vec<Category> = self.read_collection(CATEGORIES).await;
        match categories.iter().position(|c| c.id == category.id) {
            Some(pos) => categories[pos] = category.clone(),
            None => categories.push(category.clone()),
        }

        self.write_collection(CATEGORIES, &categories).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
