//! # Product Service
//!
//! Catalog operations and the session-lifetime product cache.
//!
//! ## Cache State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Cache Lifecycle                              │
//! │                                                                         │
//! │  Loading ──(first successful refresh)──► Ready                         │
//! │                                                                         │
//! │  Ready ──(mutation)──► refetch ──► Ready (new list)                    │
//! │                                                                         │
//! │  Ready ──(refresh fails)──► Ready (STALE list kept)                    │
//! │                              └─► error notification, user may retry    │
//! │                                                                         │
//! │  The cache never patches incrementally: every mutation triggers a full │
//! │  refetch. A failed fetch leaves the previous list visible instead of   │
//! │  blanking the screen.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use omtraders_core::validation::validate_product_fields;
use omtraders_core::{new_document_id, NewProduct, Product};

use crate::backend::StorageBackend;
use crate::error::StoreResult;
use crate::notify::{Notification, Notifier, TracingNotifier};

// =============================================================================
// Catalog State
// =============================================================================

/// Lifecycle state of the cached product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// No successful fetch yet; the UI shows its loading placeholder.
    Loading,
    /// At least one fetch succeeded; the cached list is rendered (possibly
    /// stale after a failed refresh).
    Ready,
}

// =============================================================================
// Product Service
// =============================================================================

/// Catalog service: CRUD plus the in-memory product list for the session.
pub struct ProductService<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    catalog: RwLock<Vec<Product>>,
    state: RwLock<CatalogState>,
}

impl<S: StorageBackend> ProductService<S> {
    /// Creates a service over the given store, reporting outcomes to the
    /// tracing log.
    pub fn new(store: Arc<S>) -> Self {
        ProductService::with_notifier(store, Arc::new(TracingNotifier))
    }

    /// Creates a service with an injected notification channel.
    pub fn with_notifier(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        ProductService {
            store,
            notifier,
            catalog: RwLock::new(Vec::new()),
            state: RwLock::new(CatalogState::Loading),
        }
    }

    /// Current cache state.
    pub async fn state(&self) -> CatalogState {
        *self.state.read().await
    }

    /// A copy of the cached product list.
    pub async fn products(&self) -> Vec<Product> {
        self.catalog.read().await.clone()
    }

    /// Looks up a cached product by id.
    pub async fn get(&self, id: &str) -> Option<Product> {
        self.catalog.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Reloads the cached list from the store.
    ///
    /// ## Behavior
    /// - Idempotent and safe to call concurrently with itself; the last
    ///   completed call's list wins (no ordering guarantee is needed - the
    ///   consuming UI is single-threaded/cooperative)
    /// - On failure the previous list stays visible (stale-but-available)
    ///   and an error notification is emitted
    pub async fn refresh(&self) -> StoreResult<()> {
        match self.store.get_products().await {
            Ok(products) => {
                debug!(count = products.len(), "Catalog refreshed");
                *self.catalog.write().await = products;
                *self.state.write().await = CatalogState::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Catalog refresh failed, keeping stale list");
                self.notifier.notify(Notification::error(
                    "Error",
                    "Failed to fetch products",
                ));
                Err(err)
            }
        }
    }

    /// Adds a product to the catalog.
    ///
    /// Assigns the identifier and timestamps, saves, refetches the list and
    /// reports the outcome. A failure is reported but not retried.
    pub async fn add_product(&self, fields: NewProduct) -> StoreResult<Product> {
        validate_product_fields(&fields)?;

        let now = Utc::now();
        let product = Product {
            id: new_document_id(),
            name: fields.name,
            description: fields.description,
            category: fields.category,
            dimensions: fields.dimensions,
            image_url: fields.image_url,
            price: fields.price,
            stock: fields.stock,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.store.save_product(&product).await {
            self.notifier
                .notify(Notification::error("Error", "Failed to add product"));
            return Err(err);
        }

        info!(id = %product.id, name = %product.name, "Product added");
        self.notifier.notify(Notification::info(
            "Product added",
            format!("{} has been added successfully.", product.name),
        ));

        // Refresh failure is already reported on the notification channel
        let _ = self.refresh().await;

        Ok(product)
    }

    /// Updates an existing product (upsert by id).
    pub async fn update_product(&self, product: Product) -> StoreResult<()> {
        if let Err(err) = self.store.save_product(&product).await {
            self.notifier
                .notify(Notification::error("Error", "Failed to update product"));
            return Err(err);
        }

        debug!(id = %product.id, "Product updated");
        self.notifier.notify(Notification::info(
            "Product updated",
            format!("{} has been updated successfully.", product.name),
        ));

        let _ = self.refresh().await;
        Ok(())
    }

    /// Deletes a product by id.
    ///
    /// Deleting an id that does not exist is not an error.
    pub async fn delete_product(&self, id: &str) -> StoreResult<()> {
        if let Err(err) = self.store.delete_product(id).await {
            self.notifier
                .notify(Notification::error("Error", "Failed to delete product"));
            return Err(err);
        }

        debug!(id = %id, "Product deleted");
        self.notifier.notify(Notification::info(
            "Product deleted",
            "The product has been deleted successfully.",
        ));

        let _ = self.refresh().await;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::notify::MemoryNotifier;
    use omtraders_core::Money;

    fn temp_store() -> Arc<LocalBackend> {
        let dir = std::env::temp_dir().join(format!("omtraders-products-{}", uuid::Uuid::new_v4()));
        Arc::new(LocalBackend::new(dir))
    }

    fn fields(name: &str, price_paise: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "PVC pipe".to_string(),
            category: "PVC".to_string(),
            dimensions: "2in x 3m".to_string(),
            image_url: String::new(),
            price: Money::from_paise(price_paise),
            stock,
        }
    }

    #[tokio::test]
    async fn test_starts_loading_becomes_ready() {
        let service = ProductService::new(temp_store());
        assert_eq!(service.state().await, CatalogState::Loading);

        service.refresh().await.unwrap();
        assert_eq!(service.state().await, CatalogState::Ready);
        assert!(service.products().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_product_assigns_id_and_refreshes_cache() {
        let notifier = Arc::new(MemoryNotifier::new());
        let service = ProductService::with_notifier(temp_store(), notifier.clone());

        let product = service.add_product(fields("Pipe 2in", 15000, 10)).await.unwrap();
        assert!(!product.id.is_empty());
        assert_eq!(product.created_at, product.updated_at);

        let cached = service.products().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Pipe 2in");

        assert!(notifier.titles().contains(&"Product added".to_string()));
    }

    #[tokio::test]
    async fn test_add_product_rejects_invalid_fields_before_any_write() {
        let store = temp_store();
        let service = ProductService::new(store.clone());

        let result = service.add_product(fields("  ", 15000, 10)).await;
        assert!(result.is_err());

        // Nothing was persisted
        assert!(store.get_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_product_refreshes_cache() {
        let service = ProductService::new(temp_store());

        let mut product = service.add_product(fields("Pipe 2in", 15000, 10)).await.unwrap();
        product.stock = 7;
        service.update_product(product).await.unwrap();

        let cached = service.products().await;
        assert_eq!(cached[0].stock, 7);
    }

    #[tokio::test]
    async fn test_delete_product_absent_id_is_not_an_error() {
        let notifier = Arc::new(MemoryNotifier::new());
        let service = ProductService::with_notifier(temp_store(), notifier.clone());
        service.refresh().await.unwrap();

        service.delete_product("never-existed").await.unwrap();
        assert!(service.products().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let service = ProductService::new(temp_store());
        let product = service.add_product(fields("Pipe 2in", 15000, 10)).await.unwrap();

        assert_eq!(service.get(&product.id).await.unwrap().name, "Pipe 2in");
        assert!(service.get("ghost").await.is_none());
    }
}
